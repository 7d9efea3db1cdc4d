// handlers/mod.rs - two handler tiers
//
// public:    no authentication (/sign-up, /sign-in, /health)
// protected: bearer token required (/actor, /film); mutations also pass the admin gate

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;

pub mod protected;
pub mod public;

pub const ID_PARSE_ERROR: &str = "Can't parse id from path";

/// Status used when the body is a list of actor/film aggregates rather than a
/// flat list.
pub fn with_films_status() -> StatusCode {
    StatusCode::from_u16(210).unwrap_or(StatusCode::OK)
}

/// Numeric `:id` path segment. Anything else is rejected with 400.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request(ID_PARSE_ERROR))?;

        raw.parse::<i64>().map(EntityId).map_err(|e| {
            tracing::warn!("HTTP 400 - {}. Message: {}", e, ID_PARSE_ERROR);
            ApiError::bad_request(ID_PARSE_ERROR)
        })
    }
}

/// Unwraps a JSON body, turning any rejection into 400 with `message`.
pub fn decode_json<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    message: &str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::warn!("HTTP 400 - {}. Message: {}", rejection.body_text(), message);
            Err(ApiError::bad_request(message))
        }
    }
}

/// GET /health - storage connectivity probe
pub async fn health(State(state): State<AppState>) -> Response {
    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": Utc::now() })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
