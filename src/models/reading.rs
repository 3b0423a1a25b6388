// Weather reading models: stored shape and the normalized wire shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Measured values of one ingested sample (everything except the timestamp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingValues {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub conditions: String,
}

/// Seconds since the Unix epoch; the only timestamp shape handed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedTimestamp(pub i64);

/// Timestamp as found in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredTimestamp {
    /// Instant assigned by the store at write time.
    Native(DateTime<Utc>),
    /// Writer omitted the timestamp (or it could not be decoded).
    Missing,
    /// Imported rows that already carry epoch seconds.
    Normalized(NormalizedTimestamp),
}

impl StoredTimestamp {
    /// The stored instant, if there is one. Missing timestamps have no instant.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match *self {
            StoredTimestamp::Native(dt) => Some(dt),
            StoredTimestamp::Normalized(NormalizedTimestamp(secs)) => {
                DateTime::from_timestamp(secs, 0)
            }
            StoredTimestamp::Missing => None,
        }
    }
}

impl From<NormalizedTimestamp> for StoredTimestamp {
    fn from(ts: NormalizedTimestamp) -> Self {
        StoredTimestamp::Normalized(ts)
    }
}

/// One reading as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub values: ReadingValues,
    pub timestamp: StoredTimestamp,
}

/// Reading returned by the read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    #[serde(flatten)]
    pub values: ReadingValues,
    pub timestamp: NormalizedTimestamp,
}

/// Numeric reading fields the aggregation engine can average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Temperature,
    Humidity,
    WindSpeed,
    Pressure,
}

impl ReadingField {
    pub fn value(self, values: &ReadingValues) -> f64 {
        match self {
            ReadingField::Temperature => values.temperature,
            ReadingField::Humidity => values.humidity,
            ReadingField::WindSpeed => values.wind_speed,
            ReadingField::Pressure => values.pressure,
        }
    }
}
