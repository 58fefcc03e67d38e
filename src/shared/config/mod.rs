//! Application configuration module
//!
//! Collects everything the process needs to decide its backends at startup:
//! the service-account blob for the remote document store, the identity
//! provider API key, the local fallback file and endpoint overrides.
//!
//! Secrets are read from a TOML secrets file first and the process
//! environment second. A missing secret is not an error; it selects the
//! corresponding fallback (local file store, demo identity).

mod secrets;

pub use secrets::Secrets;

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Hosted Firestore REST root
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Hosted identity toolkit REST root
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Secret holding the service-account JSON
pub const SERVICE_ACCOUNT_KEY: &str = "FIREBASE_SERVICE_ACCOUNT_KEY";

/// Secret holding the identity provider API key
pub const API_KEY: &str = "FIREBASE_API_KEY";

const DATA_FILE_NAME: &str = "forum_posts.json";

/// Which post store the process should try to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Try the remote store, fall back to the local file
    #[default]
    Auto,
    /// Remote store only; no local fallback
    Remote,
    /// Local file only; never try the remote store
    Local,
}

impl FromStr for BackendPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "remote" | "firestore" => Ok(Self::Remote),
            "local" | "file" => Ok(Self::Local),
            other => Err(ConfigError::InvalidValue {
                key: "THREADBOARD_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service-account credential blob (JSON text)
    pub service_account_json: Option<String>,
    /// Identity provider API key
    pub api_key: Option<String>,
    /// Path of the local fallback store
    pub local_store_path: PathBuf,
    /// Firestore REST root
    pub firestore_base_url: String,
    /// `host:port` of a Firestore emulator, if one should be used
    pub firestore_emulator_host: Option<String>,
    /// Identity toolkit REST root
    pub identity_base_url: String,
    /// Store selection policy
    pub backend: BackendPreference,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_account_json: None,
            api_key: None,
            local_store_path: default_data_path(),
            firestore_base_url: DEFAULT_FIRESTORE_URL.to_string(),
            firestore_emulator_host: None,
            identity_base_url: DEFAULT_IDENTITY_URL.to_string(),
            backend: BackendPreference::Auto,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the secrets file and environment.
    ///
    /// The secrets file path comes from `THREADBOARD_SECRETS` and defaults to
    /// `secrets.toml` in the working directory. An unreadable secrets file is
    /// logged and ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secrets_path = std::env::var("THREADBOARD_SECRETS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("secrets.toml"));

        let secrets = match Secrets::load(&secrets_path) {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::warn!("Ignoring secrets file: {}", e);
                Secrets::default()
            }
        };

        let mut builder = AppConfig::builder();
        if let Some(blob) = secrets.get(SERVICE_ACCOUNT_KEY) {
            builder = builder.service_account_json(blob);
        }
        if let Some(key) = secrets.get(API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(path) = env_value("THREADBOARD_DATA_FILE") {
            builder = builder.local_store_path(path);
        }
        if let Some(url) = env_value("FIRESTORE_BASE_URL") {
            builder = builder.firestore_base_url(url);
        }
        if let Some(host) = env_value("FIRESTORE_EMULATOR_HOST") {
            builder = builder.firestore_emulator_host(host);
        }
        if let Some(url) = env_value("IDENTITY_BASE_URL") {
            builder = builder.identity_base_url(url);
        }
        if let Some(preference) = env_value("THREADBOARD_BACKEND") {
            builder = builder.backend(preference.parse()?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url(&self.firestore_base_url)?;
        validate_url(&self.identity_base_url)?;
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    service_account_json: Option<String>,
    api_key: Option<String>,
    local_store_path: Option<PathBuf>,
    firestore_base_url: Option<String>,
    firestore_emulator_host: Option<String>,
    identity_base_url: Option<String>,
    backend: Option<BackendPreference>,
}

impl AppConfigBuilder {
    pub fn service_account_json(mut self, blob: impl Into<String>) -> Self {
        self.service_account_json = Some(blob.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn local_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_store_path = Some(path.into());
        self
    }

    pub fn firestore_base_url(mut self, url: impl Into<String>) -> Self {
        self.firestore_base_url = Some(url.into());
        self
    }

    pub fn firestore_emulator_host(mut self, host: impl Into<String>) -> Self {
        self.firestore_emulator_host = Some(host.into());
        self
    }

    pub fn identity_base_url(mut self, url: impl Into<String>) -> Self {
        self.identity_base_url = Some(url.into());
        self
    }

    pub fn backend(mut self, preference: BackendPreference) -> Self {
        self.backend = Some(preference);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            service_account_json: non_empty(self.service_account_json),
            api_key: non_empty(self.api_key),
            local_store_path: self.local_store_path.unwrap_or(defaults.local_store_path),
            firestore_base_url: trim_slash(
                self.firestore_base_url.unwrap_or(defaults.firestore_base_url),
            ),
            firestore_emulator_host: non_empty(self.firestore_emulator_host),
            identity_base_url: trim_slash(
                self.identity_base_url.unwrap_or(defaults.identity_base_url),
            ),
            backend: self.backend.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("cannot read secrets file {path}: {message}")]
    Secrets { path: String, message: String },
}

/// `<data dir>/threadboard/forum_posts.json`, or the temp dir when the
/// platform has no data directory
pub fn default_data_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push("threadboard");
    path.push(DATA_FILE_NAME);
    path
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl(url.to_string()))
    }
}
