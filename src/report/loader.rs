// Loads every scenario directory under a results tree.
//
//   <results>/<scenario>/locust_stats.csv           required
//   <results>/<scenario>/locust_stats_history.csv   optional
//   <results>/<scenario>/<process>_resources.txt    optional, any number
//   <results>/<scenario>/scenario.toml              optional

use serde::de::DeserializeOwned;
use std::path::Path;

use super::metadata::load_metadata;
use super::resources::parse_top_output;
use super::scenario::{EndpointStats, HistorySample, ResourceSample, ScenarioResult};

pub const STATS_FILE: &str = "locust_stats.csv";
pub const HISTORY_FILE: &str = "locust_stats_history.csv";
pub const RESOURCES_SUFFIX: &str = "_resources.txt";

/// All loadable scenarios, sorted by name. Directories without a usable stats
/// table are skipped with a warning.
pub fn load_scenarios(results_dir: &Path) -> anyhow::Result<Vec<ScenarioResult>> {
    let mut scenarios = Vec::new();
    for entry in std::fs::read_dir(results_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match load_scenario(&entry.path(), &name) {
            Ok(Some(s)) => scenarios.push(s),
            Ok(None) => {
                tracing::warn!(scenario = %name, "no stats file found for scenario, skipping");
            }
            Err(e) => {
                tracing::warn!(scenario = %name, error = %format!("{e:#}"), "unreadable stats file, skipping");
            }
        }
    }
    scenarios.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scenarios)
}

/// One scenario, or None when its stats table is missing. Only a broken stats
/// table is an error; optional files degrade to empty data.
pub fn load_scenario(dir: &Path, name: &str) -> anyhow::Result<Option<ScenarioResult>> {
    let stats_path = dir.join(STATS_FILE);
    if !stats_path.is_file() {
        return Ok(None);
    }
    let stats = read_stats(&stats_path)?;

    let history_path = dir.join(HISTORY_FILE);
    let history = if history_path.is_file() {
        match read_history(&history_path) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!(scenario = %name, error = %format!("{e:#}"), "unreadable history file, ignoring");
                None
            }
        }
    } else {
        None
    };

    Ok(Some(ScenarioResult {
        name: name.to_string(),
        stats,
        history,
        resources: read_resources(dir, name)?,
        metadata: load_metadata(dir, name),
    }))
}

pub fn read_stats(path: &Path) -> anyhow::Result<Vec<EndpointStats>> {
    read_csv(path)
}

pub fn read_history(path: &Path) -> anyhow::Result<Vec<HistorySample>> {
    read_csv(path)
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<T>() {
        rows.push(record.map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?);
    }
    Ok(rows)
}

fn read_resources(dir: &Path, scenario: &str) -> anyhow::Result<Vec<ResourceSample>> {
    let mut samples = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let Some(process) = file_name.strip_suffix(RESOURCES_SUFFIX) else {
            continue;
        };
        let parsed = std::fs::read_to_string(entry.path())
            .ok()
            .and_then(|text| parse_top_output(&text));
        match parsed {
            Some((cpu_cores, memory_mb)) => samples.push(ResourceSample {
                process: process.to_string(),
                cpu_cores,
                memory_mb,
            }),
            None => {
                tracing::warn!(scenario = %scenario, file = %file_name, "unparseable resource snapshot, ignoring");
            }
        }
    }
    samples.sort_by(|a, b| a.process.cmp(&b.process));
    Ok(samples)
}
