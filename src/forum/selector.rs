/**
 * Backend Selection
 *
 * Runs once at startup and decides which post store the process uses for
 * its whole lifetime:
 *
 * - `Remote` when a service-account blob is configured and a Firestore
 *   client can be built from it
 * - `Local` when the remote setup fails (or is skipped) and the local fallback is
 *   allowed
 * - `Unconfigured` when the remote setup fails and the fallback is disabled
 *
 * Failures never abort startup. The reason is logged and kept so it can be
 * surfaced to operators.
 */
use std::fmt;
use std::sync::Arc;

use crate::forum::local::LocalFileStore;
use crate::forum::remote::FirestoreStore;
use crate::forum::store::PostStore;
use crate::shared::config::SERVICE_ACCOUNT_KEY;
use crate::shared::{AppConfig, BackendPreference};

/// Which store the process settled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    Unconfigured,
    Remote,
    Local,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => f.write_str("unconfigured"),
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Outcome of the startup backend check
#[derive(Clone)]
pub struct BackendSelection {
    mode: BackendMode,
    store: Option<Arc<dyn PostStore>>,
    configuration_error: Option<String>,
}

impl fmt::Debug for BackendSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSelection")
            .field("mode", &self.mode)
            .field("configuration_error", &self.configuration_error)
            .finish()
    }
}

impl BackendSelection {
    /// Check the configuration and pick a store.
    pub fn select(config: &AppConfig) -> Self {
        if config.backend == BackendPreference::Local {
            tracing::info!("Local store selected by configuration");
            return Self::local(config, None);
        }

        let error = match config.service_account_json {
            None => format!("{} secret is not configured", SERVICE_ACCOUNT_KEY),
            Some(_) => match FirestoreStore::connect(config) {
                Ok(store) => {
                    tracing::info!("Firestore initialized successfully for forum");
                    return Self {
                        mode: BackendMode::Remote,
                        store: Some(Arc::new(store)),
                        configuration_error: None,
                    };
                }
                Err(e) => format!("Firestore initialization failed: {}", e),
            },
        };

        match config.backend {
            BackendPreference::Remote => {
                tracing::error!("{}; local fallback disabled, forum storage unavailable", error);
                Self {
                    mode: BackendMode::Unconfigured,
                    store: None,
                    configuration_error: Some(error),
                }
            }
            _ => {
                tracing::warn!("{}; falling back to local file store", error);
                Self::local(config, Some(error))
            }
        }
    }

    fn local(config: &AppConfig, configuration_error: Option<String>) -> Self {
        let store = LocalFileStore::new(&config.local_store_path);
        tracing::info!("Using local forum file {}", store.path().display());
        Self {
            mode: BackendMode::Local,
            store: Some(Arc::new(store)),
            configuration_error,
        }
    }

    /// Use a specific store, bypassing the configuration check
    pub fn with_store(mode: BackendMode, store: Arc<dyn PostStore>) -> Self {
        Self {
            mode,
            store: Some(store),
            configuration_error: None,
        }
    }

    /// A selection with no store at all
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            mode: BackendMode::Unconfigured,
            store: None,
            configuration_error: Some(reason.into()),
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    pub fn is_remote_configured(&self) -> bool {
        self.mode == BackendMode::Remote
    }

    /// Why the remote store is not in use, if it was wanted
    pub fn last_configuration_error(&self) -> Option<&str> {
        self.configuration_error.as_deref()
    }

    pub fn store(&self) -> Option<&Arc<dyn PostStore>> {
        self.store.as_ref()
    }
}
