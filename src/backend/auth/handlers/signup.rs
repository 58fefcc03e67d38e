/**
 * Signup Handler
 *
 * POST /api/auth/signup
 *
 * The password length check runs locally before the provider is called.
 * A successful signup signs the new user in immediately.
 */
use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::sessions::SessionRegistry;
use crate::backend::error::ApiError;
use crate::identity::{signup_message, IdentityClient};

/// Signup handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields, short or weak password, invalid email
/// * `409 Conflict` - an account with this email already exists
/// * `502 Bad Gateway` - provider unreachable or returned an unrecognized error
pub async fn signup(
    State(identity): State<IdentityClient>,
    State(sessions): State<SessionRegistry>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    tracing::info!("Signup request for: {}", request.email);

    let user = identity
        .signup(&request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::warn!("Signup failed for {}: {}", request.email, e);
            ApiError::from(e)
        })?;

    let token = sessions.create(user.clone()).await;
    tracing::info!("Account created for: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            message: signup_message(&user),
            user,
        }),
    ))
}
