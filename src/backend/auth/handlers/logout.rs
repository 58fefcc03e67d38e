/**
 * Logout Handler
 *
 * POST /api/auth/logout
 *
 * Drops the caller's session. Purely local: the identity provider is not
 * told, and provider tokens are not revoked.
 */
use axum::{extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::handlers::types::LogoutResponse;
use crate::backend::auth::sessions::{bearer_token, SessionRegistry};
use crate::backend::error::ApiError;

pub async fn logout(
    State(sessions): State<SessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    if !sessions.remove(token).await {
        return Err(ApiError::unauthorized("Not logged in"));
    }

    tracing::info!("Session closed");
    Ok(Json(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}
