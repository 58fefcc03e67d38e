/**
 * Identity Client
 *
 * Email/password sign-in and sign-up against the hosted identity provider.
 *
 * # Modes
 *
 * - **Configured** - an API key is available; credentials are posted to
 *   `accounts:signInWithPassword` / `accounts:signUp`
 * - **Demo** - no API key; any non-empty email/password is accepted and a
 *   fabricated identity is returned
 *
 * Local checks (empty fields, password length) run before either mode.
 * There is no token refresh and no provider call on logout.
 */
use reqwest::Client;

use crate::identity::error::AuthError;
use crate::identity::types::{Identity, PasswordRequest, PasswordResponse, ProviderErrorBody};
use crate::shared::AppConfig;

/// Shortest password accepted at signup
pub const MIN_PASSWORD_LEN: usize = 6;

/// Whether credentials are verified by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityMode {
    Demo,
    Configured,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Login,
    Signup,
}

impl Action {
    fn endpoint(self) -> &'static str {
        match self {
            Self::Login => "accounts:signInWithPassword",
            Self::Signup => "accounts:signUp",
        }
    }

    fn map_code(self, raw: &str) -> AuthError {
        match self {
            Self::Login => AuthError::from_login_code(raw),
            Self::Signup => AuthError::from_signup_code(raw),
        }
    }
}

/// Identity provider client
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl IdentityClient {
    /// Configured when the config carries an API key, demo otherwise
    pub fn from_config(config: &AppConfig) -> Self {
        let client = Self {
            http: Client::new(),
            base_url: config.identity_base_url.clone(),
            api_key: config.api_key.clone(),
        };
        match client.mode() {
            IdentityMode::Demo => {
                tracing::warn!("Identity provider credentials not found. Running in demo mode.")
            }
            IdentityMode::Configured => tracing::info!("Identity provider configured"),
        }
        client
    }

    pub fn mode(&self) -> IdentityMode {
        if self.api_key.is_some() {
            IdentityMode::Configured
        } else {
            IdentityMode::Demo
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// * `MissingFields` - email or password empty
    /// * `InvalidCredentials` / `NoSuchAccount` / `AccountDisabled` - provider rejection
    /// * `Network` - the provider could not be reached
    /// * `Unknown` - any other provider response
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        require_fields(email, password)?;
        self.authenticate(Action::Login, email.trim(), password).await
    }

    /// Create an account with email and password.
    ///
    /// # Errors
    ///
    /// * `MissingFields` - email or password empty
    /// * `PasswordTooShort` - fewer than [`MIN_PASSWORD_LEN`] characters
    /// * `AccountExists` / `InvalidEmail` / `WeakPassword` - provider rejection
    /// * `Network` / `Unknown` - as for [`IdentityClient::login`]
    pub async fn signup(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        require_fields(email, password)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        self.authenticate(Action::Signup, email.trim(), password).await
    }

    async fn authenticate(
        &self,
        action: Action,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let Some(api_key) = &self.api_key else {
            tracing::info!("Demo identity issued for {}", email);
            return Ok(Identity::demo(email));
        };

        let url = format!("{}/{}", self.base_url, action.endpoint());
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider request failed: {}", e);
                AuthError::Network(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_else(|_| status.to_string());
            let error = match serde_json::from_str::<ProviderErrorBody>(&text) {
                Ok(body) => action.map_code(&body.error.message),
                Err(_) => AuthError::Unknown(format!("{} - {}", status, text)),
            };
            tracing::warn!("{:?} rejected for {}: {}", action, email, error);
            return Err(error);
        }

        let body: PasswordResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Unknown(format!("Failed to parse response: {}", e)))?;

        tracing::info!("{:?} succeeded for {}", action, email);
        Ok(Identity {
            local_id: body.local_id,
            email: body.email.unwrap_or_else(|| email.to_string()),
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            demo: false,
        })
    }
}

fn require_fields(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Ok(())
}

/// Message shown after a successful login
pub fn login_message(identity: &Identity) -> String {
    if identity.demo {
        "Login successful! (Demo mode)".to_string()
    } else {
        "Login successful!".to_string()
    }
}

/// Message shown after a successful signup
pub fn signup_message(identity: &Identity) -> String {
    if identity.demo {
        "Account created successfully! (Demo mode)".to_string()
    } else {
        "Account created successfully!".to_string()
    }
}
