/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Process
 *
 * 1. Hand the credentials to the identity client
 * 2. Register a session for the returned identity
 * 3. Return the session token, success message and identity
 */
use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::sessions::SessionRegistry;
use crate::backend::error::ApiError;
use crate::identity::{login_message, IdentityClient};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - wrong password or unknown account
/// * `403 Forbidden` - account disabled
/// * `502 Bad Gateway` - provider unreachable or returned an unrecognized error
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "hunter22" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "5f0c6d1e-1f55-4b8e-a0b7-2d8b1d0f3c11",
///   "message": "Login successful!",
///   "user": { "local_id": "a1B2c3", "email": "user@example.com", "demo": false }
/// }
/// ```
pub async fn login(
    State(identity): State<IdentityClient>,
    State(sessions): State<SessionRegistry>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.email);

    let user = identity
        .login(&request.email, &request.password)
        .await
        .map_err(|e| {
            tracing::warn!("Login failed for {}: {}", request.email, e);
            ApiError::from(e)
        })?;

    let token = sessions.create(user.clone()).await;
    Ok(Json(AuthResponse {
        token,
        message: login_message(&user),
        user,
    }))
}
