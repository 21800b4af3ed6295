//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for the failures that end a request without an
//! image and implements Axum's `IntoResponse` to convert them to HTTP
//! responses with JSON error bodies.
//!
//! Error mappings:
//! - `InvalidParams`, `Upstream` → 400
//! - `Timeout` → 504
//! - `Internal` → 500
//!
//! Star-data failures never reach this type: they are rendered inline as an
//! error image by the chart pipeline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::github::GitHubError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    Upstream(#[from] GitHubError),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidParams(_) | AppError::Upstream(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidParams("owner".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream(GitHubError::NotFound("caarlos0/nope".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_is_passed_through() {
        let err = AppError::from(GitHubError::NotFound("caarlos0/nope".into()));
        assert_eq!(err.to_string(), "Repository not found: caarlos0/nope");
    }
}
