use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, PERMISSION_DENIED};
use crate::AppState;

/// Caller identity established from a valid bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Bearer-token middleware: rejects the request with 401 unless the
/// `Authorization` header carries a valid token, then injects [`AuthUser`].
pub async fn identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let user_id = state.services.users.parse_token(token).map_err(|e| {
        tracing::warn!("HTTP 401 - {}. Message: Can't parse token", e);
        ApiError::unauthorized("Can't parse token")
    })?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ApiError::unauthorized("empty auth header")),
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("invalid auth header"))?;

    let parts: Vec<&str> = auth_str.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err(ApiError::unauthorized("invalid auth header"));
    }
    if parts[1].is_empty() {
        return Err(ApiError::unauthorized("token is empty"));
    }

    Ok(parts[1])
}

/// Admin gate. Resolving this extractor requires [`identity`] to have run and
/// the caller to hold the "admin" role.
#[derive(Clone, Copy, Debug)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("empty auth header"))?;

        match state.services.users.is_admin(user.user_id).await {
            Ok(true) => Ok(AdminUser(user)),
            Ok(false) => {
                tracing::warn!("User {} is not an admin", user.user_id);
                Err(ApiError::forbidden())
            }
            Err(e) => Err(ApiError::service(e, PERMISSION_DENIED)),
        }
    }
}
