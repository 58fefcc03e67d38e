//! Authentication Errors
//!
//! Every way a login or signup can fail, with the user-facing message as
//! its `Display`. Provider rejections arrive as error codes such as
//! `EMAIL_NOT_FOUND` or `WEAK_PASSWORD : Password should be at least 6
//! characters`; the `from_*_code` constructors map them.

use thiserror::Error;

/// Categorized authentication failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please enter both email and password")]
    MissingFields,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No account found with this email")]
    NoSuchAccount,

    #[error("This account has been disabled")]
    AccountDisabled,

    #[error("An account with this email already exists")]
    AccountExists,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is too weak. Use at least 6 characters")]
    WeakPassword,

    #[error("Could not reach the identity provider: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Map a provider error message returned by the sign-in endpoint
    pub fn from_login_code(raw: &str) -> Self {
        match error_code(raw) {
            "INVALID_PASSWORD" | "INVALID_EMAIL" | "INVALID_LOGIN_CREDENTIALS" => {
                Self::InvalidCredentials
            }
            "EMAIL_NOT_FOUND" => Self::NoSuchAccount,
            "USER_DISABLED" => Self::AccountDisabled,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Map a provider error message returned by the sign-up endpoint
    pub fn from_signup_code(raw: &str) -> Self {
        match error_code(raw) {
            "EMAIL_EXISTS" => Self::AccountExists,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "WEAK_PASSWORD" => Self::WeakPassword,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    /// Whether the user can fix this by changing what they typed
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Network(_) | Self::Unknown(_))
    }
}

/// Leading `UPPER_SNAKE` code of a provider message
fn error_code(raw: &str) -> &str {
    let raw = raw.trim();
    let end = raw
        .find(|c: char| !(c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'))
        .unwrap_or(raw.len());
    &raw[..end]
}
