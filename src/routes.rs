// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::artifact_repo::ArtifactRepo;
use crate::dashboard::DashboardService;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: Arc<DashboardService>,
    pub(crate) artifacts: Arc<ArtifactRepo>,
}

pub fn app(dashboard: Arc<DashboardService>, artifacts: Arc<ArtifactRepo>) -> Router {
    let state = AppState {
        dashboard,
        artifacts,
    };
    Router::new()
        .route("/", get(|| async { "Weather dashboard API" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/current", get(http::current_handler)) // GET /current
        .route("/history", get(http::history_handler)) // GET /history
        .route("/average-temperature", get(http::average_temperature_handler)) // GET /average-temperature
        .route("/temperature-trend", get(http::temperature_trend_handler)) // GET /temperature-trend
        .route("/artifacts/{name}", get(http::artifact_handler)) // GET /artifacts/<name>?expires=&signature=
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
