// GET handlers: version, readings, average, trend image, signed artifact download

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;
use crate::artifact_repo::AccessError;
use crate::error::ApiError;
use crate::models::{AverageTemperature, NormalizedReading, TrendImageResponse};
use crate::version::{NAME, VERSION};

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /current — newest reading, or 404 when the store is empty.
pub(super) async fn current_handler(
    State(state): State<AppState>,
) -> Result<Json<NormalizedReading>, ApiError> {
    state.dashboard.latest().await.map(Json)
}

/// GET /history — up to 100 readings, newest first. Always 200.
pub(super) async fn history_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<NormalizedReading>>, ApiError> {
    state.dashboard.history().await.map(Json)
}

pub(super) async fn average_temperature_handler(
    State(state): State<AppState>,
) -> Result<Json<AverageTemperature>, ApiError> {
    state.dashboard.average_temperature().await.map(Json)
}

pub(super) async fn temperature_trend_handler(
    State(state): State<AppState>,
) -> Result<Json<TrendImageResponse>, ApiError> {
    let image = state.dashboard.latest_trend_image().await?;
    Ok(Json(image.into()))
}

#[derive(Debug, Deserialize)]
pub(super) struct SignedQuery {
    expires: i64,
    signature: String,
}

pub(super) async fn artifact_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(q): Query<SignedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    match state
        .artifacts
        .verify(&name, q.expires, &q.signature, Utc::now())
    {
        Ok(()) => {}
        Err(AccessError::NoSigningKey) => {
            return Err(ApiError::Upstream(AccessError::NoSigningKey.to_string()));
        }
        Err(e) => return Err(ApiError::Forbidden(e.to_string())),
    }
    let data = state
        .artifacts
        .read(&name)
        .await
        .map_err(|e| ApiError::upstream("Failed to read artifact", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Artifact {} not found", name)))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], data))
}
