//! Snakes & Ladders — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ladders_board::TopologyError;
use ladders_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable or the board file is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The board table breaks a topology rule; no session may start.
    #[error("invalid board: {0}")]
    Topology(#[from] TopologyError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::InvalidConfiguration(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid_configuration")
            }
            DomainError::Infrastructure(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_configuration_maps_to_500() {
        assert_eq!(
            status_of(DomainError::InvalidConfiguration("no board".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infrastructure_maps_to_503() {
        assert_eq!(
            status_of(DomainError::Infrastructure("worker gone".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_code_and_message() {
        let response =
            ApiError(DomainError::Infrastructure("worker gone".into())).into_response();

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "infrastructure_error");
        assert_eq!(json["message"], "infrastructure error: worker gone");
    }

    #[test]
    fn test_topology_error_converts_to_app_error() {
        let err: AppError = TopologyError::StartsOnFinish.into();

        assert_eq!(
            err.to_string(),
            "invalid board: square 100 cannot start a snake or ladder"
        );
    }
}
