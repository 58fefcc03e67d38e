//! Post Store Abstraction
//!
//! The forum service talks to exactly one `PostStore` for the lifetime of
//! the process. Both implementations must produce the same externally
//! visible behavior: posts newest-first, replies oldest-first, an unknown
//! post id rejected on reply, `reply_count` equal to the replies accepted.

use std::fmt;

use async_trait::async_trait;

use crate::shared::{ForumError, NewPost, NewReply, Post, PostId};

/// Which implementation backs a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Local,
    Remote,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Remote => f.write_str("remote"),
        }
    }
}

/// Persistence contract for forum posts and replies.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Which backend this is
    fn kind(&self) -> StoreKind;

    /// Store a new post with zero replies.
    ///
    /// Returns the id assigned by the store.
    async fn insert_post(&self, post: NewPost) -> Result<PostId, ForumError>;

    /// Up to `limit` posts, newest first, each with its replies oldest first.
    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>, ForumError>;

    /// Append a reply to an existing post and bump its reply count.
    ///
    /// Fails with `ForumError::PostNotFound` and changes nothing when no
    /// post has the given id.
    async fn append_reply(&self, post_id: &PostId, reply: NewReply) -> Result<(), ForumError>;
}
