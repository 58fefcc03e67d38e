//! Secret lookup
//!
//! Secrets live in an optional TOML file with top-level keys. A value may be
//! a string or, for credential blobs, an inline table which is re-encoded as
//! JSON. Keys missing from the file are looked up in the environment.

use std::path::Path;

use super::ConfigError;

/// Secrets loaded from a TOML file, falling back to the environment
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    table: toml::Table,
}

impl Secrets {
    /// Load a secrets file. A missing file yields an empty set.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No secrets file at {}", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Secrets {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|message| ConfigError::Secrets {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse secrets from TOML text
    pub fn parse(text: &str) -> Result<Self, String> {
        let table = text.parse::<toml::Table>().map_err(|e| e.to_string())?;
        Ok(Self { table })
    }

    /// Look up a secret, file first and environment second
    pub fn get(&self, key: &str) -> Option<String> {
        let from_file = self.table.get(key).and_then(|value| match value {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Table(_) => serde_json::to_string(value).ok(),
            _ => None,
        });

        from_file
            .or_else(|| std::env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }
}
