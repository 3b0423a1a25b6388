// Trend chart artifact models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A located trend chart: blob name, capture instant parsed from the name, and a
/// short-lived access URL. Recomputed per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendImageRef {
    pub name: String,
    pub captured_at: DateTime<Utc>,
    pub url: String,
}

/// Body of GET /temperature-trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendImageResponse {
    pub image_url: String,
    pub image_name: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<TrendImageRef> for TrendImageResponse {
    fn from(r: TrendImageRef) -> Self {
        Self {
            image_url: r.url,
            image_name: r.name,
            timestamp: Some(r.captured_at),
        }
    }
}

/// Body of GET /average-temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageTemperature {
    pub average_temperature: f64,
}
