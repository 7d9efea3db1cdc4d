// handlers/public/auth.rs - POST /sign-up and POST /sign-in

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::DEFAULT_ROLE;
use crate::error::ApiError;
use crate::handlers::decode_json;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

/**
 * POST /sign-up - Register a user
 *
 * Input:  `{"login": "...", "password": "...", "role": "admin"}`
 * `role` is optional and falls back to `user`.
 * Output: 201 with `{"id": <user id>}`
 */
pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = decode_json(payload, "Can't decode user from json")?;
    let role = request
        .role
        .as_deref()
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE);

    let id = state
        .services
        .users
        .create_user(&request.login, &request.password, role)
        .await
        .map_err(|e| ApiError::service(e, "Can't create user"))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))).into_response())
}

/**
 * POST /sign-in - Exchange credentials for a bearer token
 *
 * Input:  `{"login": "...", "password": "..."}`
 * Output: 200 with `{"token": "<jwt>"}`
 */
pub async fn sign_in(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let request = decode_json(payload, "Can't decode credentials from json")?;
    let token = state
        .services
        .users
        .generate_token(&request.login, &request.password)
        .await
        .map_err(|e| ApiError::service(e, "Can't generate token"))?;

    Ok(Json(json!({ "token": token })).into_response())
}
