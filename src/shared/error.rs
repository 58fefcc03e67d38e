//! Shared Error Types
//!
//! This module defines the error taxonomy surfaced by the forum layer. Every
//! failure a caller can see is one of these kinds; store-specific errors are
//! converted at the store boundary and never leak through.
//!
//! # Error Categories
//!
//! - `Validation` - user-correctable input problem
//! - `StoreUnavailable` - no backend is active
//! - `Store` - I/O or provider failure
//! - `PostNotFound` - a reply targeted a post the store does not hold
//!
//! # Usage
//!
//! ```rust
//! use threadboard::shared::error::ForumError;
//!
//! let error = ForumError::validation("topic", "must be at least 5 characters");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

/// Errors returned by forum operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForumError {
    /// Input failed validation after sanitization
    #[error("Validation error in field '{field}': {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable reason
        reason: String,
    },

    /// No post store is configured for this process
    #[error("Forum storage is not configured")]
    StoreUnavailable,

    /// The active store failed
    #[error("Store error: {cause}")]
    Store {
        /// Description of the underlying failure
        cause: String,
    },

    /// A reply referenced a post that does not exist
    #[error("Post not found: {id}")]
    PostNotFound {
        /// The id the caller supplied
        id: String,
    },
}

impl ForumError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new store error
    pub fn store(cause: impl Into<String>) -> Self {
        Self::Store {
            cause: cause.into(),
        }
    }

    /// Create a new not-found error
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::PostNotFound { id: id.into() }
    }

    /// Whether the caller can fix this by changing their input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for ForumError {
    fn from(err: serde_json::Error) -> Self {
        Self::store(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for ForumError {
    fn from(err: std::io::Error) -> Self {
        Self::store(format!("I/O error: {}", err))
    }
}
