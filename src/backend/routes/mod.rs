//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── auth_routes.rs  - /api/auth/*
//! └── forum_routes.rs - /api/forum/*
//! ```
//!
//! # Routes
//!
//! - `GET /health` - liveness check
//! - `POST /api/auth/signup`, `POST /api/auth/login`
//! - `GET /api/auth/me`, `POST /api/auth/logout`
//! - `GET /api/forum/posts`, `POST /api/forum/posts`
//! - `POST /api/forum/posts/{id}/replies`
//! - `GET /api/forum/search`, `GET /api/forum/status`

/// Main router creation
pub mod router;

/// Authentication routes
pub mod auth_routes;

/// Forum routes
pub mod forum_routes;

pub use router::create_router;
