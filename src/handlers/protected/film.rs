// handlers/protected/film.rs - /film endpoints

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::Film;
use crate::error::ApiError;
use crate::handlers::{decode_json, with_films_status, EntityId};
use crate::middleware::AdminUser;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FilmListQuery {
    pub title: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub actor: Option<String>,
    pub sort: Option<String>,
}

impl FilmListQuery {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    fn desc(&self) -> bool {
        self.sort.as_deref() == Some("desc")
    }
}

#[derive(Debug, Deserialize)]
pub struct AddActorsRequest {
    pub actors: Vec<i64>,
}

/// GET /film?title=&orderBy=&actor=&sort=desc|asc
///
/// Precedence: title with orderBy, then title alone, then actor (answered
/// with 210 and actor/film aggregates), then a plain sorted listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FilmListQuery>,
) -> Result<Response, ApiError> {
    let films = &state.services.films;
    let title = FilmListQuery::non_empty(&query.title);
    let order_by = FilmListQuery::non_empty(&query.order_by);
    let actor = FilmListQuery::non_empty(&query.actor);

    let response = match (title, order_by, actor) {
        (Some(title), Some(order_by), _) => {
            let list = films
                .films_sorted_like(order_by, title, query.desc())
                .await
                .map_err(|e| ApiError::service(e, "Can't get sort films"))?;
            Json(list).into_response()
        }
        (Some(title), None, _) => {
            let list = films
                .films_like(title)
                .await
                .map_err(|e| ApiError::service(e, "Can't get films"))?;
            Json(list).into_response()
        }
        (None, _, Some(actor)) => {
            let list = films
                .search_with_actor(actor)
                .await
                .map_err(|e| ApiError::service(e, "Can't get films with actor"))?;
            (with_films_status(), Json(list)).into_response()
        }
        (None, order_by, None) => {
            let list = films
                .films_sorted(order_by.unwrap_or_default(), query.desc())
                .await
                .map_err(|e| ApiError::service(e, "Can't get films"))?;
            Json(list).into_response()
        }
    };

    Ok(response)
}

/// POST /film
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<Film>, JsonRejection>,
) -> Result<Response, ApiError> {
    let film = decode_json(payload, "Can't parse film from json")?;
    let id = state
        .services
        .films
        .create(film)
        .await
        .map_err(|e| ApiError::service(e, "Can't create film"))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

/// GET /film/:id
pub async fn get(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<Film>, ApiError> {
    let film = state
        .services
        .films
        .get(id)
        .await
        .map_err(|e| ApiError::service(e, "Can't get film"))?;
    Ok(Json(film))
}

/// PUT /film/:id
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    _admin: AdminUser,
    payload: Result<Json<Film>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let film = decode_json(payload, "Can't parse film from json")?;
    state
        .services
        .films
        .update(id, film)
        .await
        .map_err(|e| ApiError::service(e, "Can't update film"))?;
    Ok(StatusCode::CREATED)
}

/// DELETE /film/:id
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    _admin: AdminUser,
) -> Result<StatusCode, ApiError> {
    state
        .services
        .films
        .delete(id)
        .await
        .map_err(|e| ApiError::service(e, "Can't delete film"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /film/:id - attach actors to the film
pub async fn add_actors(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    _admin: AdminUser,
    payload: Result<Json<AddActorsRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let request = decode_json(payload, "Can't parse actors from json")?;
    state
        .services
        .films
        .add_actors(id, &request.actors)
        .await
        .map_err(|e| ApiError::service(e, "Can't add actors to film"))?;
    Ok(StatusCode::NO_CONTENT)
}
