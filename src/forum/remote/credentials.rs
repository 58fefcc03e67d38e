/**
 * Service Account Credentials
 *
 * Parses the service-account blob and turns it into bearer tokens for the
 * Firestore REST API using the OAuth2 JWT-bearer grant:
 *
 * 1. Sign a short-lived RS256 assertion with the account's private key
 * 2. Exchange it at the account's `token_uri` for an access token
 * 3. Reuse the access token until one minute before it expires
 *
 * Against an emulator no exchange happens; the emulator accepts the fixed
 * `owner` token.
 */
use std::time::{Duration, Instant};

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::RemoteError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Fields of a service-account key file the forum needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccount {
    /// Parse a service-account JSON blob.
    pub fn from_json(blob: &str) -> Result<Self, RemoteError> {
        let account: ServiceAccount = serde_json::from_str(blob)
            .map_err(|e| RemoteError::Credentials(format!("not a service account blob: {}", e)))?;
        if account.project_id.trim().is_empty() {
            return Err(RemoteError::Credentials("project_id is empty".to_string()));
        }
        Ok(account)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

pub(crate) struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Source of bearer tokens for Firestore requests
pub(crate) enum TokenSource {
    /// Fixed token (emulator)
    Static(String),
    /// Tokens minted from a service account
    ServiceAccount {
        account: ServiceAccount,
        key: EncodingKey,
        cached: Mutex<Option<CachedToken>>,
    },
}

impl TokenSource {
    /// Token source for a Firestore emulator
    pub fn emulator() -> Self {
        Self::Static("owner".to_string())
    }

    /// Build a token source from a service account, checking the key up front.
    pub fn from_account(account: ServiceAccount) -> Result<Self, RemoteError> {
        if account.client_email.trim().is_empty() {
            return Err(RemoteError::Credentials("client_email is empty".to_string()));
        }
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| RemoteError::Credentials(format!("unusable private_key: {}", e)))?;
        Ok(Self::ServiceAccount {
            account,
            key,
            cached: Mutex::new(None),
        })
    }

    /// A bearer token valid for at least the next minute
    pub async fn token(&self, http: &reqwest::Client) -> Result<String, RemoteError> {
        match self {
            Self::Static(token) => Ok(token.clone()),
            Self::ServiceAccount { account, key, cached } => {
                let mut cached = cached.lock().await;
                if let Some(token) = cached.as_ref() {
                    if Instant::now() < token.refresh_at {
                        return Ok(token.token.clone());
                    }
                }

                let fresh = exchange(http, account, key).await?;
                let token = fresh.access_token.clone();
                let lifetime = Duration::from_secs(fresh.expires_in);
                *cached = Some(CachedToken {
                    token: fresh.access_token,
                    refresh_at: Instant::now() + lifetime.saturating_sub(REFRESH_MARGIN),
                });
                Ok(token)
            }
        }
    }
}

async fn exchange(
    http: &reqwest::Client,
    account: &ServiceAccount,
    key: &EncodingKey,
) -> Result<TokenResponse, RemoteError> {
    let now = chrono::Utc::now().timestamp();
    let claims = AssertionClaims {
        iss: &account.client_email,
        scope: DATASTORE_SCOPE,
        aud: &account.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid = account.private_key_id.clone();

    let assertion = encode(&header, &claims, key)
        .map_err(|e| RemoteError::Token(format!("failed to sign assertion: {}", e)))?;

    tracing::debug!("Requesting access token for {}", account.client_email);
    let response = http
        .post(&account.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(RemoteError::Token(format!("{} - {}", status, body)));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| RemoteError::Token(format!("failed to parse token response: {}", e)))
}
