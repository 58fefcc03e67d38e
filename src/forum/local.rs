//! # Local File Store
//!
//! Fallback post storage in a single human-readable JSON file. The whole
//! post list is rewritten on every change.
//!
//! ## File Format
//!
//! A top-level array, newest post first:
//!
//! ```json
//! [
//!   {
//!     "id": 2,
//!     "name": "Alice",
//!     "topic": "Hello there",
//!     "message": "First post on the board",
//!     "timestamp": "2024-01-01 10:00:00",
//!     "replies": [{ "name": "Bob", "message": "Welcome!", "timestamp": "2024-01-01 10:05:00" }]
//!   }
//! ]
//! ```
//!
//! `reply_count` is not stored; it is the length of `replies` whenever a
//! post is read.
//!
//! ## Concurrency
//!
//! Read-modify-write cycles within one process are serialized by a mutex.
//! Separate processes sharing the file are not coordinated and can lose
//! each other's updates.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::forum::store::{PostStore, StoreKind};
use crate::shared::post::now_timestamp;
use crate::shared::{ForumError, NewPost, NewReply, Post, PostId, Reply};

/// Most posts the file keeps; older posts are evicted on insert
pub const MAX_LOCAL_POSTS: usize = 100;

/// On-disk shape of a post
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPost {
    id: u64,
    name: String,
    topic: String,
    message: String,
    timestamp: String,
    #[serde(default)]
    replies: Vec<Reply>,
}

impl From<StoredPost> for Post {
    fn from(stored: StoredPost) -> Self {
        Post {
            id: PostId::from(stored.id),
            reply_count: stored.replies.len() as u64,
            name: stored.name,
            topic: stored.topic,
            message: stored.message,
            timestamp: stored.timestamp,
            replies: stored.replies,
        }
    }
}

/// JSON-file post store
#[derive(Debug)]
pub struct LocalFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored post, newest first.
    ///
    /// Returns an empty list when the file is absent, unreadable, not JSON,
    /// or not a top-level array.
    pub async fn load(&self) -> Vec<Post> {
        self.load_records().await.into_iter().map(Post::from).collect()
    }

    /// Overwrite the file with `posts`.
    ///
    /// Returns `false` on any I/O or encoding failure, including a post id
    /// that is not a local sequence number.
    pub async fn save(&self, posts: &[Post]) -> bool {
        let mut records = Vec::with_capacity(posts.len());
        for post in posts {
            let Ok(id) = post.id.as_str().parse::<u64>() else {
                tracing::error!("Refusing to save post with non-numeric id {}", post.id);
                return false;
            };
            records.push(StoredPost {
                id,
                name: post.name.clone(),
                topic: post.topic.clone(),
                message: post.message.clone(),
                timestamp: post.timestamp.clone(),
                replies: post.replies.clone(),
            });
        }
        self.save_records(&records).await
    }

    async fn load_records(&self) -> Vec<StoredPost> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Invalid JSON in {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        let serde_json::Value::Array(items) = value else {
            tracing::warn!("{} does not hold a list of posts", self.path.display());
            return Vec::new();
        };

        // Skip bad records individually so one of them cannot erase the rest
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<StoredPost>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        "Skipping malformed post #{} in {}: {}",
                        index,
                        self.path.display(),
                        e
                    );
                    None
                }
            })
            .collect()
    }

    async fn save_records(&self, records: &[StoredPost]) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    tracing::error!("Failed to create {}: {}", parent.display(), e);
                    return false;
                }
            }
        }

        let json = match serde_json::to_string_pretty(records) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode posts: {}", e);
                return false;
            }
        };

        match tokio::fs::write(&self.path, json).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to write {}: {}", self.path.display(), e);
                false
            }
        }
    }
}

#[async_trait]
impl PostStore for LocalFileStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostId, ForumError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records().await;

        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        records.insert(
            0,
            StoredPost {
                id,
                name: post.name().to_string(),
                topic: post.topic().to_string(),
                message: post.message().to_string(),
                timestamp: now_timestamp(),
                replies: Vec::new(),
            },
        );
        records.truncate(MAX_LOCAL_POSTS);

        if !self.save_records(&records).await {
            return Err(ForumError::store(format!(
                "could not write {}",
                self.path.display()
            )));
        }

        tracing::info!("Stored local post {}", id);
        Ok(PostId::from(id))
    }

    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>, ForumError> {
        let mut posts = self.load().await;
        posts.truncate(limit);
        Ok(posts)
    }

    async fn append_reply(&self, post_id: &PostId, reply: NewReply) -> Result<(), ForumError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_records().await;

        let target = post_id
            .as_str()
            .parse::<u64>()
            .ok()
            .and_then(|id| records.iter_mut().find(|r| r.id == id));
        let Some(record) = target else {
            return Err(ForumError::post_not_found(post_id.as_str()));
        };

        record.replies.push(reply.into_reply(now_timestamp()));

        if !self.save_records(&records).await {
            return Err(ForumError::store(format!(
                "could not write {}",
                self.path.display()
            )));
        }
        Ok(())
    }
}
