// Domain models

mod reading;
mod trend;

pub use reading::{
    NormalizedReading, NormalizedTimestamp, ReadingField, ReadingValues, StoredTimestamp,
    WeatherReading,
};
pub use trend::{AverageTemperature, TrendImageRef, TrendImageResponse};
