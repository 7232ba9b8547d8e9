//! REST API endpoints.
//!
//! Axum-based HTTP API: user listings, per-user stats and match history,
//! six-category leaderboards, and match submission.

pub mod routes;
pub mod state;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::StorageError;
use crate::validate::{self, Schema, ValidationFailure};
use state::AppState;

/// API error types. Every failure funnels through here and comes out as a
/// `{"msg": …}` body with the mapped status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed schema validation; carries the fixed per-field message.
    #[error("{0}")]
    Validation(&'static str),

    /// A referenced user does not exist.
    #[error("User \"{0}\" not found")]
    UnknownUser(String),

    /// Validation failed in a way the failure table does not know.
    #[error("Unknown server error")]
    Unclassified,

    /// The document store failed; the message is the store's own error.
    #[error("{0}")]
    Store(#[from] StorageError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub msg: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::UnknownUser(_) => StatusCode::BAD_REQUEST,
            ApiError::Unclassified | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            msg: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        match failure.message() {
            Some(msg) => ApiError::Validation(msg),
            None => ApiError::Unclassified,
        }
    }
}

/// Validate an input object against an endpoint schema, mapping the first
/// error through the failure table.
pub fn check_request(instance: &serde_json::Value, schema: &Schema) -> Result<(), ApiError> {
    let report = validate::validate(instance, schema);
    if report.valid {
        Ok(())
    } else {
        Err(report
            .first_failure()
            .unwrap_or(ValidationFailure::Unknown)
            .into())
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Sorry, can't find that!")
}

/// Assemble the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/user", get(routes::users::user_detail))
        .route("/user-info", get(routes::users::user_info))
        .route("/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/match", post(routes::matches::add_match))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_unmatched_route_is_plain_text_404() {
        let state = AppState::from_store(Arc::new(MemoryStore::new()));
        let app = build_router(state);

        let resp = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Sorry, can't find that!");
    }

    #[test]
    fn test_store_error_message_is_the_stores_own() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(StorageError::Io(io));
        assert_eq!(err.to_string(), "IO error: denied");
    }

    #[test]
    fn test_unclassified_failure_is_generic() {
        let err = ApiError::from(ValidationFailure::Unknown);
        assert_eq!(err.to_string(), "Unknown server error");
    }
}
