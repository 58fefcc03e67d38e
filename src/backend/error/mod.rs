//! Backend Error Module
//!
//! HTTP-facing error type for the server. Forum and identity errors convert
//! into `ApiError`, which renders as a status code plus a JSON body.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Response Format
//!
//! ```json
//! { "error": "Validation error in field 'topic': must be at least 5 characters", "status": 400 }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
