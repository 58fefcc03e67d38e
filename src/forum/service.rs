/**
 * Forum Service
 *
 * The public forum operations. Each write sanitizes and validates its input
 * before it reaches the store; each read degrades to an empty result
 * instead of failing.
 *
 * The service is built once from a `BackendSelection` and never changes
 * store afterwards.
 */
use std::sync::Arc;

use crate::forum::selector::{BackendMode, BackendSelection};
use crate::forum::store::{PostStore, StoreKind};
use crate::shared::{AppConfig, ForumError, NewPost, NewReply, Post, PostId};

/// Posts returned when the caller does not ask for a specific count
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Most recent posts a search scans
pub const SEARCH_SCAN_LIMIT: usize = 1000;

/// Shortest query `search` acts on
pub const MIN_QUERY_LEN: usize = 2;

/// Forum operations over the active store
#[derive(Debug, Clone)]
pub struct ForumService {
    selection: BackendSelection,
}

impl ForumService {
    pub fn new(selection: BackendSelection) -> Self {
        Self { selection }
    }

    /// Check the configuration and build a service over the chosen store
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(BackendSelection::select(config))
    }

    /// Build a service over an explicit store
    pub fn with_store(store: Arc<dyn PostStore>) -> Self {
        let mode = match store.kind() {
            StoreKind::Local => BackendMode::Local,
            StoreKind::Remote => BackendMode::Remote,
        };
        Self::new(BackendSelection::with_store(mode, store))
    }

    pub fn selection(&self) -> &BackendSelection {
        &self.selection
    }

    pub fn mode(&self) -> BackendMode {
        self.selection.mode()
    }

    fn store(&self) -> Result<&Arc<dyn PostStore>, ForumError> {
        self.selection.store().ok_or(ForumError::StoreUnavailable)
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// * `Validation` - a field is empty or too short after sanitization
    /// * `StoreUnavailable` - no store is active
    /// * `Store` - the store failed to persist the post
    pub async fn add_post(&self, name: &str, topic: &str, message: &str) -> Result<PostId, ForumError> {
        let post = NewPost::parse(name, topic, message).inspect_err(|e| {
            tracing::warn!("Rejected post: {}", e);
        })?;
        let id = self.store()?.insert_post(post).await?;
        tracing::info!("Post {} added", id);
        Ok(id)
    }

    /// Up to `limit` posts, newest first, with replies oldest first.
    ///
    /// Store failures are logged and yield an empty list.
    pub async fn list_posts(&self, limit: usize) -> Vec<Post> {
        let Ok(store) = self.store() else {
            return Vec::new();
        };
        match store.list_posts(limit).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::error!("Error getting posts from {} store: {}", store.kind(), e);
                Vec::new()
            }
        }
    }

    /// Reply to an existing post.
    ///
    /// # Errors
    ///
    /// * `Validation` - missing post id, or a field empty or too short
    /// * `PostNotFound` - no post has `post_id`; nothing is written
    /// * `StoreUnavailable` / `Store` - as for [`ForumService::add_post`]
    pub async fn add_reply(&self, post_id: &str, name: &str, message: &str) -> Result<(), ForumError> {
        let post_id = post_id.trim();
        if post_id.is_empty() {
            return Err(ForumError::validation("post_id", "is required"));
        }
        let reply = NewReply::parse(name, message).inspect_err(|e| {
            tracing::warn!("Rejected reply: {}", e);
        })?;

        let post_id = PostId::from(post_id);
        self.store()?.append_reply(&post_id, reply).await?;
        tracing::info!("Reply added to post {}", post_id);
        Ok(())
    }

    /// Posts whose text, or any reply's text, contains `query`.
    ///
    /// Case-insensitive substring match over the most recent
    /// [`SEARCH_SCAN_LIMIT`] posts, scanned linearly. Queries shorter than
    /// [`MIN_QUERY_LEN`] characters return nothing.
    pub async fn search(&self, query: &str) -> Vec<Post> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let query_lower = query.to_lowercase();

        self.list_posts(SEARCH_SCAN_LIMIT)
            .await
            .into_iter()
            .filter(|post| post.matches(&query_lower))
            .collect()
    }
}
