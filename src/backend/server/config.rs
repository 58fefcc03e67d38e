/**
 * Server Configuration
 *
 * Loads the application configuration and the listening port.
 *
 * Configuration problems are logged and never prevent startup: a broken
 * secrets file or a malformed override falls back to the defaults, which
 * in turn select the local store and demo identity.
 */
use crate::shared::AppConfig;

/// Port used when `SERVER_PORT` is unset or unparsable
pub const DEFAULT_PORT: u16 = 3000;

/// Load `AppConfig` from the secrets file and environment
///
/// Falls back to `AppConfig::default()` if the environment is invalid.
pub fn load_config() -> AppConfig {
    match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            tracing::warn!("Continuing with default configuration");
            AppConfig::default()
        }
    }
}

/// Port from `SERVER_PORT`, defaulting to 3000
pub fn server_port() -> u16 {
    parse_port(std::env::var("SERVER_PORT").ok().as_deref())
}

fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => DEFAULT_PORT,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid SERVER_PORT '{}', using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}
