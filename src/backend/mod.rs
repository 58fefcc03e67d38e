//! Backend Module
//!
//! axum HTTP server over the forum service and identity client. Only
//! compiled with the `server` feature (on by default).
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - State, configuration, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Login, signup, sessions
//! ├── forum/          - Post, reply, search and status handlers
//! └── error/          - HTTP error type
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `ForumService` (whose store is chosen once at
//! startup), the `IdentityClient` and the in-memory `SessionRegistry`.
//! Handlers extract the piece they need through `FromRef`.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. `ApiError` picks the status code
//! from the underlying `ForumError` or `AuthError` and renders
//! `{"error": message, "status": code}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication handlers and sessions
pub mod auth;

/// Forum handlers
pub mod forum;

pub use error::ApiError;
pub use server::{create_app, AppState};
