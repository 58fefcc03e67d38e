//! Identity Module
//!
//! Account authentication delegated to a hosted identity provider, with a
//! non-verifying demo mode when no provider key is configured.
//!
//! # Module Structure
//!
//! ```text
//! identity/
//! ├── mod.rs      - Module exports and documentation
//! ├── client.rs   - IdentityClient (login/signup)
//! ├── error.rs    - AuthError and provider code mapping
//! ├── session.rs  - Per-session current user
//! └── types.rs    - Identity and provider wire types
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use threadboard::identity::{IdentityClient, Session};
//! use threadboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IdentityClient::from_config(&AppConfig::from_env()?);
//! let mut session = Session::new();
//!
//! match client.login("user@example.com", "hunter22").await {
//!     Ok(identity) => session.establish(identity),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

/// Identity provider client
pub mod client;

/// Authentication errors
pub mod error;

/// Session state
pub mod session;

/// Identity and wire types
pub mod types;

pub use client::{login_message, signup_message, IdentityClient, IdentityMode, MIN_PASSWORD_LEN};
pub use error::AuthError;
pub use session::Session;
pub use types::Identity;
