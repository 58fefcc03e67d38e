/**
 * Get Current User Handler
 *
 * GET /api/auth/me
 *
 * Requires `Authorization: Bearer <token>` with a token issued by login or
 * signup. Returns the identity stored in that session.
 */
use axum::{extract::State, http::HeaderMap, response::Json};

use crate::backend::auth::sessions::{bearer_token, SessionRegistry};
use crate::backend::error::ApiError;
use crate::identity::Identity;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - header missing, malformed, or token unknown
pub async fn get_me(
    State(sessions): State<SessionRegistry>,
    headers: HeaderMap,
) -> Result<Json<Identity>, ApiError> {
    let token = bearer_token(&headers).ok_or_else(|| {
        tracing::warn!("Missing or malformed authorization header");
        ApiError::unauthorized("Missing bearer token")
    })?;

    let identity = sessions.get(token).await.ok_or_else(|| {
        tracing::warn!("Unknown session token");
        ApiError::unauthorized("Not logged in")
    })?;

    Ok(Json(identity))
}
