//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup - Account creation
//! - **`login`** - POST /api/auth/login - Sign-in
//! - **`get_me`** - GET /api/auth/me - Current user
//! - **`logout`** - POST /api/auth/logout - Sign-out
//!
//! # Example
//!
//! ```rust,no_run
//! use threadboard::backend::auth::handlers::{get_me, login, logout, signup};
//! use threadboard::backend::server::AppState;
//! use axum::{routing::get, routing::post, Router};
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/api/auth/signup", post(signup))
//!     .route("/api/auth/login", post(login))
//!     .route("/api/auth/me", get(get_me))
//!     .route("/api/auth/logout", post(logout));
//! ```

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Logout handler
pub mod logout;

pub use types::{AuthResponse, CredentialsRequest, LogoutResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use signup::signup;
