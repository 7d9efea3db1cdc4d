// handlers/protected/actor.rs - /actor endpoints

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::Actor;
use crate::error::ApiError;
use crate::handlers::{decode_json, with_films_status, EntityId};
use crate::middleware::AdminUser;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ActorListQuery {
    #[serde(rename = "withFilms")]
    pub with_films: Option<String>,
}

/// GET /actor[?withFilms=true]
///
/// Plain list with 200, or one `{Actor, Films}` entry per actor that has
/// films, with 210.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ActorListQuery>,
) -> Result<Response, ApiError> {
    if query.with_films.as_deref() == Some("true") {
        let actors = state
            .services
            .actors
            .list_with_films()
            .await
            .map_err(|e| ApiError::service(e, "Can't get actors with film"))?;
        return Ok((with_films_status(), Json(actors)).into_response());
    }

    let actors = state
        .services
        .actors
        .list()
        .await
        .map_err(|e| ApiError::service(e, "Can't get actors"))?;
    Ok(Json(actors).into_response())
}

/// POST /actor
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<Actor>, JsonRejection>,
) -> Result<Response, ApiError> {
    let actor = decode_json(payload, "Can't decode actor from json")?;
    let id = state
        .services
        .actors
        .create(actor)
        .await
        .map_err(|e| ApiError::service(e, "Can't create actor"))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

/// GET /actor/:id
pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Actor>, ApiError> {
    let actor = state
        .services
        .actors
        .get(id)
        .await
        .map_err(|e| ApiError::service(e, "Can't get actor"))?;
    Ok(Json(actor))
}

/// PUT /actor/:id
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    _admin: AdminUser,
    payload: Result<Json<Actor>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let actor = decode_json(payload, "Can't decode actor from json")?;
    state
        .services
        .actors
        .update(id, actor)
        .await
        .map_err(|e| ApiError::service(e, "Can't update actor"))?;
    Ok(StatusCode::CREATED)
}

/// DELETE /actor/:id
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    _admin: AdminUser,
) -> Result<StatusCode, ApiError> {
    state
        .services
        .actors
        .delete(id)
        .await
        .map_err(|e| ApiError::service(e, "Can't delete actor"))?;
    Ok(StatusCode::NO_CONTENT)
}
