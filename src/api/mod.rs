//! REST API endpoints.
//!
//! Axum-based HTTP API for browsing the points table and
//! running position calculations against it.

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::models::StandingsError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) | ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let details = match &self {
            ApiError::Validation(details) => details.clone(),
            _ => Vec::new(),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StandingsError> for ApiError {
    fn from(err: StandingsError) -> Self {
        match err {
            StandingsError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StandingsError::SameTeam(_)
            | StandingsError::Overflow(_)
            | StandingsError::OutOfRange(_) => ApiError::BadRequest(err.to_string()),
            StandingsError::DuplicateTeam(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// CORS policy for the configured origin.
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(AllowOrigin::exact(value)),
        Err(e) => {
            warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
            layer
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(routes::standings::banner))
        .route("/api/points-table", get(routes::standings::points_table))
        .route("/api/teams", get(routes::standings::teams))
        .route("/api/calculate", post(routes::calculate::calculate))
        .layer(cors_layer(&server.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_error_mapping() {
        let err: ApiError = StandingsError::NotFound("Mumbai".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = StandingsError::SameTeam("Mumbai".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = StandingsError::OutOfRange("0 overs".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = StandingsError::Overflow("Mumbai".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Validation(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_error_detail_omits_empty_details() {
        let detail = ErrorDetail {
            code: "NOT_FOUND".to_string(),
            message: "Not found: x".to_string(),
            details: Vec::new(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("details").is_none());
    }
}
