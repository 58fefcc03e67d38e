/**
 * Backend Error Types
 *
 * `ApiError` wraps the library's error kinds and decides the HTTP status
 * each one is reported with.
 *
 * # Status Mapping
 *
 * | Kind                                   | Status |
 * |----------------------------------------|--------|
 * | forum validation                       | 400    |
 * | post not found                         | 404    |
 * | forum store unavailable                | 503    |
 * | forum store error                      | 500    |
 * | missing / short / weak / invalid input | 400    |
 * | bad credentials, unknown account       | 401    |
 * | disabled account                       | 403    |
 * | account already exists                 | 409    |
 * | provider unreachable or unrecognized   | 502    |
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::identity::AuthError;
use crate::shared::ForumError;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Forum operation failed
    #[error(transparent)]
    Forum(#[from] ForumError),

    /// Login or signup failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request-level problem (missing token, bad header)
    #[error("{message}")]
    Handler {
        status: StatusCode,
        message: String,
    },
}

impl ApiError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forum(err) => match err {
                ForumError::Validation { .. } => StatusCode::BAD_REQUEST,
                ForumError::PostNotFound { .. } => StatusCode::NOT_FOUND,
                ForumError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                ForumError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(err) => match err {
                AuthError::MissingFields
                | AuthError::PasswordTooShort(_)
                | AuthError::InvalidEmail
                | AuthError::WeakPassword => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::NoSuchAccount => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::AccountDisabled => StatusCode::FORBIDDEN,
                AuthError::AccountExists => StatusCode::CONFLICT,
                AuthError::Network(_) | AuthError::Unknown(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Handler { status, .. } => *status,
        }
    }
}
