use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::AppState;

pub const REQUEST_TIMED_OUT: &str = "request timed out";

/// Drops the in-flight handler (and its storage calls) once the configured
/// request deadline passes, answering 408 with the usual error body.
pub async fn request_deadline(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limit = Duration::from_secs(state.config.api.request_timeout_secs);
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("HTTP 408 - \"{}\" exceeded {:?}. Message: {}", uri, limit, REQUEST_TIMED_OUT);
            ApiError::request_timeout(REQUEST_TIMED_OUT).into_response()
        }
    }
}
