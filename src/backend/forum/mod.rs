//! Forum Routes Module
//!
//! HTTP handlers over [`ForumService`](crate::forum::ForumService).
//!
//! # Endpoints
//!
//! - `GET /api/forum/posts?limit=N` - newest posts (default 10)
//! - `POST /api/forum/posts` - create a post
//! - `POST /api/forum/posts/{id}/replies` - reply to a post
//! - `GET /api/forum/search?q=...` - search posts and replies
//! - `GET /api/forum/status` - active backend mode

/// Request and response types
pub mod types;

/// HTTP handlers
pub mod handlers;

pub use handlers::{create_post, create_reply, list_posts, search_posts, status};
