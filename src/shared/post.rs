/**
 * Forum Data Structures
 *
 * This module defines the Post and Reply records returned to callers, plus
 * the validated drafts (`NewPost`, `NewReply`) that stores accept.
 *
 * Drafts can only be built through `parse`, which sanitizes every field and
 * then checks its length bounds. A store therefore never sees raw user text.
 */
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::ForumError;
use crate::shared::sanitize::{sanitize, MESSAGE_MAX_LEN, NAME_MAX_LEN, TOPIC_MAX_LEN};

/// Display format for every timestamp handed to callers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum author name length (posts and replies)
pub const NAME_MIN_LEN: usize = 2;

/// Minimum post topic length
pub const TOPIC_MIN_LEN: usize = 5;

/// Minimum post message length
pub const POST_MESSAGE_MIN_LEN: usize = 10;

/// Minimum reply message length
pub const REPLY_MESSAGE_MIN_LEN: usize = 5;

/// Opaque post identifier
///
/// The local store numbers posts sequentially while the remote store uses
/// provider-generated ids; both are carried as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for PostId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A reply attached to a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub name: String,
    pub message: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// A top-level forum entry with its replies
///
/// `replies` is always ordered oldest-first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub name: String,
    pub topic: String,
    pub message: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub reply_count: u64,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Post {
    /// Lower-cased text a search query is matched against.
    ///
    /// Covers the post's topic, message and author followed by every
    /// reply's message and author.
    pub fn search_text(&self) -> String {
        let mut text = format!("{} {} {}", self.topic, self.message, self.name).to_lowercase();
        for reply in &self.replies {
            text.push_str(&format!(" {} {}", reply.message, reply.name).to_lowercase());
        }
        text
    }

    /// Whether this post (or one of its replies) contains `query_lower`
    pub fn matches(&self, query_lower: &str) -> bool {
        self.search_text().contains(query_lower)
    }
}

/// A sanitized, validated post waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    name: String,
    topic: String,
    message: String,
}

impl NewPost {
    /// Sanitize and validate raw post fields.
    ///
    /// # Errors
    ///
    /// `ForumError::Validation` naming the first field that is empty after
    /// sanitization, or else the first field below its minimum length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use threadboard::shared::post::NewPost;
    ///
    /// let post = NewPost::parse("Alice", "Hello", "<i>first</i> post here").unwrap();
    /// assert_eq!(post.message(), "first post here");
    /// assert!(NewPost::parse("Alice", "shor", "long enough message").is_err());
    /// ```
    pub fn parse(name: &str, topic: &str, message: &str) -> Result<Self, ForumError> {
        let name = sanitize(name, NAME_MAX_LEN);
        let topic = sanitize(topic, TOPIC_MAX_LEN);
        let message = sanitize(message, MESSAGE_MAX_LEN);

        require_present(&[("name", &name), ("topic", &topic), ("message", &message)])?;
        require_min("name", &name, NAME_MIN_LEN)?;
        require_min("topic", &topic, TOPIC_MIN_LEN)?;
        require_min("message", &message, POST_MESSAGE_MIN_LEN)?;

        Ok(Self { name, topic, message })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A sanitized, validated reply waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    name: String,
    message: String,
}

impl NewReply {
    /// Sanitize and validate raw reply fields.
    pub fn parse(name: &str, message: &str) -> Result<Self, ForumError> {
        let name = sanitize(name, NAME_MAX_LEN);
        let message = sanitize(message, MESSAGE_MAX_LEN);

        require_present(&[("name", &name), ("message", &message)])?;
        require_min("name", &name, NAME_MIN_LEN)?;
        require_min("message", &message, REPLY_MESSAGE_MIN_LEN)?;

        Ok(Self { name, message })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Turn the draft into a stored reply with the given display timestamp
    pub fn into_reply(self, timestamp: String) -> Reply {
        Reply {
            name: self.name,
            message: self.message,
            timestamp,
        }
    }
}

fn require_present(fields: &[(&str, &str)]) -> Result<(), ForumError> {
    match fields.iter().find(|(_, value)| value.is_empty()) {
        Some((field, _)) => Err(ForumError::validation(*field, "is required")),
        None => Ok(()),
    }
}

fn require_min(field: &str, value: &str, min: usize) -> Result<(), ForumError> {
    if value.chars().count() < min {
        return Err(ForumError::validation(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    Ok(())
}

/// Format an instant the way posts and replies display it
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// The current time in display format
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}
