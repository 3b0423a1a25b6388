// Read side of the dashboard: latest, history, 24h average, newest trend chart.
// Stateless between calls; the store handles are injected at startup.

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::aggregation::{self, NoData};
use crate::artifact_repo::ArtifactRepo;
use crate::error::ApiError;
use crate::models::{AverageTemperature, NormalizedReading, ReadingField, TrendImageRef};
use crate::reading_repo::{HISTORY_LIMIT, ReadingRepo};
use crate::timestamp::normalize_reading;
use crate::trend::TrendResolver;

pub const NO_TREND_MESSAGE: &str = "No temperature trend images found";
const TREND_FAILURE_CONTEXT: &str = "Failed to fetch temperature trend";

pub struct DashboardService {
    readings: Arc<ReadingRepo>,
    artifacts: Arc<ArtifactRepo>,
    resolver: TrendResolver,
    trend_stem: String,
}

impl DashboardService {
    pub fn new(
        readings: Arc<ReadingRepo>,
        artifacts: Arc<ArtifactRepo>,
        trend_stem: &str,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            readings,
            artifacts,
            resolver: TrendResolver::new(trend_stem)?,
            trend_stem: trend_stem.to_string(),
        })
    }

    #[instrument(skip(self), fields(operation = "latest"))]
    pub async fn latest(&self) -> Result<NormalizedReading, ApiError> {
        let reading = self
            .readings
            .latest_reading()
            .await
            .map_err(|e| ApiError::upstream("Failed to fetch latest reading", e))?
            .ok_or_else(ApiError::no_data_found)?;
        Ok(normalize_reading(reading))
    }

    /// Newest first, at most HISTORY_LIMIT entries; an empty store gives an empty list.
    #[instrument(skip(self), fields(operation = "history"))]
    pub async fn history(&self) -> Result<Vec<NormalizedReading>, ApiError> {
        let readings = self
            .readings
            .recent_readings(HISTORY_LIMIT)
            .await
            .map_err(|e| ApiError::upstream("Failed to fetch history", e))?;
        Ok(readings.into_iter().map(normalize_reading).collect())
    }

    #[instrument(skip(self), fields(operation = "average_temperature"))]
    pub async fn average_temperature(&self) -> Result<AverageTemperature, ApiError> {
        let now = Utc::now();
        let readings = self
            .readings
            .readings_since(aggregation::window_start(now))
            .await
            .map_err(|e| ApiError::upstream("Failed to fetch readings", e))?;
        let average_temperature = aggregation::average(&readings, ReadingField::Temperature, now)
            .map_err(|NoData| ApiError::NoData)?;
        Ok(AverageTemperature {
            average_temperature,
        })
    }

    #[instrument(skip(self), fields(operation = "latest_trend_image"))]
    pub async fn latest_trend_image(&self) -> Result<TrendImageRef, ApiError> {
        let names = self
            .artifacts
            .list_names(&self.trend_stem)
            .await
            .map_err(|e| ApiError::upstream(TREND_FAILURE_CONTEXT, e))?;
        let (name, captured_at) = self
            .resolver
            .latest(names.iter().map(String::as_str))
            .ok_or_else(|| ApiError::NotFound(NO_TREND_MESSAGE.to_string()))?;
        let url = self
            .artifacts
            .signed_url(name, Utc::now())
            .map_err(|e| ApiError::upstream(TREND_FAILURE_CONTEXT, e))?;
        Ok(TrendImageRef {
            name: name.to_string(),
            captured_at,
            url,
        })
    }
}
