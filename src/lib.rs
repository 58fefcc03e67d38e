//! threadboard - Main Library
//!
//! A small discussion forum: posts, replies and search, stored either in a
//! hosted Firestore database or, when that is not configured, in a local
//! JSON file. Sign-in is delegated to a hosted identity provider, with a
//! demo mode when no provider key is available.
//!
//! # Module Structure
//!
//! - **`shared`** - Types used by every layer
//!   - `Post`, `Reply`, `PostId`, `ForumError`
//!   - `AppConfig` and secrets loading
//!   - Input sanitization
//!
//! - **`forum`** - Forum core
//!   - `PostStore` with the local file and Firestore implementations
//!   - Backend selection (once per process)
//!   - `ForumService` (add, list, reply, search)
//!
//! - **`identity`** - Authentication
//!   - `IdentityClient` (login/signup), `AuthError`, `Session`
//!
//! - **`backend`** - axum HTTP server (only compiled with `server`)
//!
//! # Feature Flags
//!
//! - **`server`** (default) - enables the `backend` module and the
//!   `threadboard-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use threadboard::forum::ForumService;
//! use threadboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let forum = ForumService::from_config(&config);
//!
//! forum.add_post("Ada", "Lifetimes", "How long does a borrow live?").await?;
//! for post in forum.list_posts(10).await {
//!     println!("{} ({} replies)", post.topic, post.reply_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `ForumError` for forum operations (validation, store failures)
//! - `AuthError` for login and signup
//! - `ApiError` maps both onto HTTP status codes in `backend::error`
//!
//! Reads degrade to empty results on store failure; writes report it.

/// Shared types and data structures
pub mod shared;

/// Posts, replies, stores and backend selection
pub mod forum;

/// Identity provider client and sessions
pub mod identity;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;
