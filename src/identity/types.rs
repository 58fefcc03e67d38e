/**
 * Identity Types
 *
 * Wire types for the identity provider's REST endpoints and the `Identity`
 * record handed back to callers.
 */
use serde::{Deserialize, Serialize};

/// Local id given to every demo identity
pub const DEMO_LOCAL_ID: &str = "demo_user";

/// An authenticated (or, in demo mode, fabricated) user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Provider user id
    pub local_id: String,
    pub email: String,
    /// Provider id token; absent in demo mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Whether this identity was fabricated without verification
    pub demo: bool,
}

impl Identity {
    /// A non-verified identity for demo mode
    pub fn demo(email: impl Into<String>) -> Self {
        Self {
            local_id: DEMO_LOCAL_ID.to_string(),
            email: email.into(),
            id_token: None,
            refresh_token: None,
            demo: true,
        }
    }
}

/// Body of `accounts:signInWithPassword` and `accounts:signUp`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

/// Successful provider response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResponse {
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Failed provider response: `{"error": {"code": 400, "message": "EMAIL_EXISTS"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
}
