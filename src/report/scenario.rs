// Per-scenario load-test input: Locust stats rows, optional history, resource samples.

use serde::{Deserialize, Deserializer};

/// Synthetic totals row Locust appends to every stats table.
pub const AGGREGATED_ROW: &str = "Aggregated";

/// One row of `locust_stats.csv`. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointStats {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Request Count")]
    pub request_count: u64,
    #[serde(rename = "Failure Count")]
    pub failure_count: u64,
    #[serde(rename = "Median Response Time", deserialize_with = "lenient_f64")]
    pub median_ms: f64,
    #[serde(rename = "Average Response Time", deserialize_with = "lenient_f64")]
    pub average_ms: f64,
    #[serde(rename = "95%", deserialize_with = "lenient_f64")]
    pub p95_ms: f64,
    #[serde(rename = "Requests/s", deserialize_with = "lenient_f64")]
    pub requests_per_sec: f64,
}

impl EndpointStats {
    pub fn is_aggregated(&self) -> bool {
        self.name == AGGREGATED_ROW
    }
}

/// One row of `locust_stats_history.csv`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistorySample {
    #[serde(rename = "User Count", deserialize_with = "lenient_f64")]
    pub user_count: f64,
    #[serde(rename = "Requests/s", deserialize_with = "lenient_f64")]
    pub requests_per_sec: f64,
}

/// CPU/memory snapshot of one process, from `<process>_resources.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSample {
    pub process: String,
    pub cpu_cores: f64,
    pub memory_mb: f64,
}

/// Load shape of a scenario, shown verbatim in the report ("N/A" when unknown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioMetadata {
    pub users: String,
    pub spawn_rate: String,
    pub duration: String,
}

impl ScenarioMetadata {
    pub fn not_available() -> Self {
        Self {
            users: "N/A".into(),
            spawn_rate: "N/A".into(),
            duration: "N/A".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub name: String,
    /// All stats rows as loaded, including the aggregated row.
    pub stats: Vec<EndpointStats>,
    pub history: Option<Vec<HistorySample>>,
    /// Sorted by process name.
    pub resources: Vec<ResourceSample>,
    pub metadata: ScenarioMetadata,
}

impl ScenarioResult {
    /// Per-endpoint rows, without the aggregated row.
    pub fn endpoint_rows(&self) -> impl Iterator<Item = &EndpointStats> {
        self.stats.iter().filter(|r| !r.is_aggregated())
    }
}

/// Locust writes "N/A" (or nothing) for percentiles of endpoints without requests.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return Ok(0.0);
    }
    trimmed.parse::<f64>().map_err(serde::de::Error::custom)
}
