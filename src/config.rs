use serde::Deserialize;

/// Environment variable overriding `collector.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
/// Environment variable overriding `artifacts.signing_key`.
pub const SIGNING_KEY_ENV: &str = "ARTIFACT_SIGNING_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub collector: CollectorConfig,
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub city: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Never committed to the file in deployments; see API_KEY_ENV.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory holding the rendered trend charts.
    pub dir: String,
    #[serde(default = "default_stem")]
    pub stem: String,
    /// Validity of minted access URLs.
    #[serde(default = "default_url_ttl_secs")]
    pub url_ttl_secs: u64,
    /// Prepended to minted URLs, e.g. "https://dash.example.org". Empty = relative URLs.
    #[serde(default)]
    pub public_base_url: String,
    #[serde(default)]
    pub signing_key: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".into()
}

fn default_units() -> String {
    "metric".into()
}

fn default_interval_secs() -> u64 {
    600
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_stem() -> String {
    crate::trend::TREND_STEM.into()
}

fn default_url_ttl_secs() -> u64 {
    15 * 60
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests). Ignores the environment.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            self.collector.api_key = Some(key);
        }
        if let Ok(key) = std::env::var(SIGNING_KEY_ENV)
            && !key.is_empty()
        {
            self.artifacts.signing_key = Some(key);
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            !self.collector.city.is_empty(),
            "collector.city must be non-empty"
        );
        anyhow::ensure!(
            self.collector.interval_secs > 0,
            "collector.interval_secs must be > 0, got {}",
            self.collector.interval_secs
        );
        anyhow::ensure!(
            self.collector.request_timeout_secs > 0,
            "collector.request_timeout_secs must be > 0, got {}",
            self.collector.request_timeout_secs
        );
        anyhow::ensure!(
            !self.artifacts.dir.is_empty(),
            "artifacts.dir must be non-empty"
        );
        anyhow::ensure!(
            !self.artifacts.stem.is_empty(),
            "artifacts.stem must be non-empty"
        );
        anyhow::ensure!(
            self.artifacts.url_ttl_secs > 0,
            "artifacts.url_ttl_secs must be > 0, got {}",
            self.artifacts.url_ttl_secs
        );
        Ok(())
    }
}
