//! Shared Module
//!
//! Types used by every layer of the crate: the forum records, the error
//! taxonomy, configuration and input sanitization. Nothing in here performs
//! I/O except configuration loading.

/// Post and reply records
pub mod post;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// User input sanitization
pub mod sanitize;

/// Re-export commonly used types for convenience
pub use post::{NewPost, NewReply, Post, PostId, Reply};
pub use error::ForumError;
pub use config::{AppConfig, AppConfigBuilder, BackendPreference, ConfigError};
pub use sanitize::sanitize;
