// Error kinds surfaced at the HTTP boundary. The status code carries the kind;
// the body is always {"error": "<message>"}.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt::Display;

pub const NO_DATA_MESSAGE: &str = "No data found";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No matching record or artifact.
    #[error("{0}")]
    NotFound(String),
    /// Aggregation window was empty.
    #[error("No data found")]
    NoData,
    /// Store, network or credential failure; message includes the cause.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Forbidden(String),
}

impl ApiError {
    pub fn no_data_found() -> Self {
        ApiError::NotFound(NO_DATA_MESSAGE.to_string())
    }

    /// Wraps an underlying failure with a human-readable context; `{:#}` keeps anyhow chains.
    pub fn upstream(context: &str, err: impl Display) -> Self {
        ApiError::Upstream(format!("{context}: {err:#}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Upstream(ref msg) = self {
            tracing::warn!(error = %msg, "request failed");
        }
        (
            status,
            axum::Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
