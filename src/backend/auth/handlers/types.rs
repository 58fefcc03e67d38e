/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the signup, login, me and logout
 * handlers.
 */
use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Login or signup request
///
/// Missing fields deserialize as empty strings so the identity client can
/// report them as `MissingFields` instead of the extractor rejecting the body.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Auth response
///
/// Returned by signup and login. `token` is presented as a bearer token on
/// later requests.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    /// User-facing success message (mentions demo mode when applicable)
    pub message: String,
    pub user: Identity,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LogoutResponse {
    pub message: String,
}
