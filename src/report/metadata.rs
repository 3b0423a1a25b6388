// Scenario load shape: explicit `scenario.toml` first, legacy name matching second.

use serde::Deserialize;
use std::path::Path;

use super::scenario::ScenarioMetadata;

pub const METADATA_FILE: &str = "scenario.toml";

/// Contents of `scenario.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataFile {
    pub users: u32,
    pub spawn_rate: f64,
    pub duration: String,
}

impl From<MetadataFile> for ScenarioMetadata {
    fn from(f: MetadataFile) -> Self {
        Self {
            users: f.users.to_string(),
            spawn_rate: f.spawn_rate.to_string(),
            duration: f.duration,
        }
    }
}

/// Known scenario kinds, matched case-insensitively against the directory name in
/// this order. Kept for result trees recorded before `scenario.toml` existed.
const LEGACY_PROFILES: &[(&str, &str, &str, &str)] = &[
    ("baseline", "50", "5", "15 min"),
    ("moderate", "100", "10", "15 min"),
    ("heavy", "200", "20", "15 min"),
    ("spike", "300", "50", "5 min"),
    ("endurance", "80", "10", "60 min"),
];

pub fn legacy_metadata(scenario_name: &str) -> ScenarioMetadata {
    let lower = scenario_name.to_lowercase();
    LEGACY_PROFILES
        .iter()
        .find(|(needle, ..)| lower.contains(needle))
        .map(|(_, users, spawn_rate, duration)| ScenarioMetadata {
            users: (*users).into(),
            spawn_rate: (*spawn_rate).into(),
            duration: (*duration).into(),
        })
        .unwrap_or_else(ScenarioMetadata::not_available)
}

/// Metadata for the scenario in `dir`. An unreadable or invalid `scenario.toml`
/// is logged and the legacy lookup is used instead.
pub fn load_metadata(dir: &Path, scenario_name: &str) -> ScenarioMetadata {
    let path = dir.join(METADATA_FILE);
    if !path.is_file() {
        return legacy_metadata(scenario_name);
    }
    let parsed = std::fs::read_to_string(&path)
        .map_err(anyhow::Error::from)
        .and_then(|s| toml::from_str::<MetadataFile>(&s).map_err(anyhow::Error::from));
    match parsed {
        Ok(file) => file.into(),
        Err(e) => {
            tracing::warn!(
                scenario = %scenario_name,
                error = %e,
                "invalid {}, falling back to name-based metadata",
                METADATA_FILE
            );
            legacy_metadata(scenario_name)
        }
    }
}
