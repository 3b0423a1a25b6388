// Shared test helpers

#![allow(dead_code)]

use std::sync::Arc;
use tempfile::TempDir;
use weather_dashboard::artifact_repo::ArtifactRepo;
use weather_dashboard::config::ArtifactsConfig;
use weather_dashboard::models::ReadingValues;
use weather_dashboard::reading_repo::ReadingRepo;

pub const TEST_SIGNING_KEY: &str = "test-signing-key";

pub fn values(temperature: f64) -> ReadingValues {
    ReadingValues {
        city: "London".into(),
        temperature,
        humidity: 60.0,
        wind_speed: 3.5,
        pressure: 1012.0,
        conditions: "light rain".into(),
    }
}

/// Fresh, initialized store in a throwaway directory. Keep the TempDir alive.
pub async fn reading_repo(dir: &TempDir) -> Arc<ReadingRepo> {
    let path = dir.path().join("readings.db");
    let repo = ReadingRepo::connect(path.to_str().unwrap(), 2).await.unwrap();
    repo.init().await.unwrap();
    Arc::new(repo)
}

pub fn artifacts_config(dir: &std::path::Path, signing_key: Option<&str>) -> ArtifactsConfig {
    ArtifactsConfig {
        dir: dir.to_str().unwrap().to_string(),
        stem: "temperature_trends".into(),
        url_ttl_secs: 900,
        public_base_url: String::new(),
        signing_key: signing_key.map(str::to_string),
    }
}

pub fn artifact_repo(dir: &std::path::Path, signing_key: Option<&str>) -> Arc<ArtifactRepo> {
    Arc::new(ArtifactRepo::new(&artifacts_config(dir, signing_key)))
}
