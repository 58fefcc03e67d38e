//! Authentication Module
//!
//! HTTP surface over the identity client. Credentials are checked by the
//! identity provider (or accepted in demo mode); the server only keeps an
//! opaque session token per signed-in user.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── sessions.rs     - In-memory session registry
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Account creation handler
//!     ├── login.rs    - Sign-in handler
//!     ├── me.rs       - Current user handler
//!     └── logout.rs   - Sign-out handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup / Login**: email and password → identity provider → session token returned
//! 2. **Get Me**: `Authorization: Bearer <token>` → identity of that session
//! 3. **Logout**: session discarded; the provider is not contacted
//!
//! Sessions live in process memory and do not survive a restart.

/// Session token registry
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, CredentialsRequest};
pub use handlers::{get_me, login, logout, signup};
pub use sessions::SessionRegistry;
