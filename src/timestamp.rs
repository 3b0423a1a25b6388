// Timestamp normalization: every reading leaves the service with epoch seconds.

use chrono::{DateTime, Utc};

use crate::models::{NormalizedReading, NormalizedTimestamp, StoredTimestamp, WeatherReading};

/// Normalizes against the current wall clock.
pub fn normalize(stored: &StoredTimestamp) -> NormalizedTimestamp {
    normalize_at(stored, Utc::now())
}

/// Normalizes a stored timestamp; `now` is only consulted when the timestamp is missing.
///
/// Never fails and is idempotent: feeding the result back as
/// `StoredTimestamp::Normalized` yields the same value.
pub fn normalize_at(stored: &StoredTimestamp, now: DateTime<Utc>) -> NormalizedTimestamp {
    match *stored {
        StoredTimestamp::Native(dt) => NormalizedTimestamp(dt.timestamp()),
        StoredTimestamp::Normalized(ts) => ts,
        StoredTimestamp::Missing => NormalizedTimestamp(now.timestamp()),
    }
}

pub fn normalize_reading(reading: WeatherReading) -> NormalizedReading {
    normalize_reading_at(reading, Utc::now())
}

pub fn normalize_reading_at(reading: WeatherReading, now: DateTime<Utc>) -> NormalizedReading {
    NormalizedReading {
        timestamp: normalize_at(&reading.timestamp, now),
        values: reading.values,
    }
}

/// Decodes the text form the store keeps for native instants (RFC 3339, or
/// SQLite's `YYYY-MM-DD HH:MM:SS[.fff]`). Undecodable text counts as missing.
pub fn parse_stored_text(text: &str) -> StoredTimestamp {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return StoredTimestamp::Native(dt.with_timezone(&Utc));
    }
    match chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        Ok(naive) => StoredTimestamp::Native(naive.and_utc()),
        Err(e) => {
            tracing::debug!(error = %e, value = %text, "unparseable stored timestamp, treating as missing");
            StoredTimestamp::Missing
        }
    }
}
