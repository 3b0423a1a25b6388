// Rolling-window statistics over weather readings.
// Evaluated per call against the readings handed in; nothing is cached.

use chrono::{DateTime, Duration, Utc};

use crate::models::{ReadingField, WeatherReading};

/// Length of the trailing window used by the average endpoint.
pub const AVERAGE_WINDOW_SECS: i64 = 24 * 60 * 60;

/// The window held no readings. Callers report this as not-found, never as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no readings in the aggregation window")]
pub struct NoData;

/// Start of the trailing window ending at `now`. Readings must be strictly after it.
pub fn window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::seconds(AVERAGE_WINDOW_SECS)
}

/// Mean of `field` over readings strictly after `now - 24h`, rounded to 2 decimals.
/// Readings without a stored timestamp are never inside the window.
pub fn average(
    readings: &[WeatherReading],
    field: ReadingField,
    now: DateTime<Utc>,
) -> Result<f64, NoData> {
    let boundary = window_start(now);
    let values: Vec<f64> = readings
        .iter()
        .filter(|r| r.timestamp.instant().is_some_and(|t| t > boundary))
        .map(|r| field.value(&r.values))
        .collect();
    if values.is_empty() {
        return Err(NoData);
    }
    Ok(round2(mean_f64(&values)))
}

/// Rounds to 2 decimals, half away from zero on the binary value.
/// 1.125 → 1.13; 1.005 (stored as 1.00499…) → 1.0.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
