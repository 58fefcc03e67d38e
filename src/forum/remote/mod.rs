//! # Remote Document Store Adapter
//!
//! Stores posts in Cloud Firestore through its REST API.
//!
//! ## Layout
//!
//! - `forum_posts/{post_id}`: `name`, `topic`, `message`, `timestamp`
//!   (server time), `created_at` (client ISO string), `reply_count`
//! - `forum_posts/{post_id}/replies/{reply_id}`: `name`, `message`,
//!   `timestamp`, `created_at`
//!
//! ## Writes
//!
//! Every write is a `documents:commit` so the document and its
//! server-timestamp transform land together. A reply and the parent's
//! `reply_count` increment share one commit; the increment is guarded by
//! an existence precondition, so a reply to a missing post writes nothing.
//! The counter is only ever changed with the provider's atomic increment.
//!
//! ## Errors
//!
//! Transport, token and provider failures are [`RemoteError`]s inside this
//! module and leave it as `ForumError::Store`.

mod credentials;
pub mod value;

pub use credentials::ServiceAccount;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use thiserror::Error;

use crate::forum::store::{PostStore, StoreKind};
use crate::shared::{AppConfig, ForumError, NewPost, NewReply, Post, PostId, Reply};

use credentials::TokenSource;
use value::{client_created_at, integer_value, server_timestamp_transform, string_value, Document};

/// Collection holding top-level posts
pub const POSTS_COLLECTION: &str = "forum_posts";

/// Sub-collection holding a post's replies
pub const REPLIES_COLLECTION: &str = "replies";

/// Reply queries in flight at once while listing posts
const MAX_CONCURRENT_REPLY_QUERIES: usize = 16;

/// Failures talking to Firestore
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("invalid service account: {0}")]
    Credentials(String),

    #[error("token exchange failed: {0}")]
    Token(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("firestore returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Whether the provider rejected a write because a document is missing
    pub fn is_missing_document(&self) -> bool {
        match self {
            Self::Api { code, .. } => {
                matches!(code.as_deref(), Some("NOT_FOUND") | Some("FAILED_PRECONDITION"))
            }
            _ => false,
        }
    }
}

impl From<RemoteError> for ForumError {
    fn from(err: RemoteError) -> Self {
        ForumError::store(err.to_string())
    }
}

/// Firestore-backed post store
pub struct FirestoreStore {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    tokens: TokenSource,
}

impl std::fmt::Debug for FirestoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreStore")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

impl FirestoreStore {
    /// Build a store from configuration.
    ///
    /// Requires a service-account blob. With an emulator host configured the
    /// blob only needs a `project_id`; otherwise its private key must parse.
    /// No request is made here.
    pub fn connect(config: &AppConfig) -> Result<Self, RemoteError> {
        let blob = config
            .service_account_json
            .as_deref()
            .ok_or_else(|| RemoteError::Credentials("no service account configured".to_string()))?;
        let account = ServiceAccount::from_json(blob)?;
        let project_id = account.project_id.clone();

        let (base_url, tokens) = match &config.firestore_emulator_host {
            Some(host) => (format!("http://{}/v1", host), TokenSource::emulator()),
            None => (
                config.firestore_base_url.clone(),
                TokenSource::from_account(account)?,
            ),
        };

        let http = reqwest::Client::builder().build()?;

        tracing::info!("Firestore client ready for project {} at {}", project_id, base_url);
        Ok(Self {
            http,
            base_url,
            project_id,
            tokens,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    fn documents_root(&self) -> String {
        format!("projects/{}/databases/(default)/documents", self.project_id)
    }

    fn post_name(&self, post_id: &str) -> String {
        format!("{}/{}/{}", self.documents_root(), POSTS_COLLECTION, post_id)
    }

    fn new_document_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, RemoteError> {
        let token = self.tokens.token(&self.http).await?;
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let error = &body["error"];
            return Err(RemoteError::Api {
                status: status.as_u16(),
                code: error["status"].as_str().map(str::to_string),
                message: error["message"]
                    .as_str()
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
                    .to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn commit(&self, writes: Vec<Value>) -> Result<(), RemoteError> {
        let path = format!("{}:commit", self.documents_root());
        self.post_json(&path, &json!({ "writes": writes })).await?;
        Ok(())
    }

    /// Run a structured query under `parent` and return the matched documents
    async fn run_query(&self, parent: &str, query: Value) -> Result<Vec<Document>, RemoteError> {
        let path = format!("{}:runQuery", parent);
        let response = self
            .post_json(&path, &json!({ "structuredQuery": query }))
            .await?;

        let rows = response
            .as_array()
            .ok_or_else(|| RemoteError::Decode("runQuery did not return a list".to_string()))?;

        rows.iter()
            .filter_map(|row| row.get("document"))
            .map(|doc| {
                serde_json::from_value(doc.clone()).map_err(|e| RemoteError::Decode(e.to_string()))
            })
            .collect()
    }

    async fn fetch_replies(&self, post_id: &str) -> Result<Vec<Reply>, RemoteError> {
        let query = json!({
            "from": [{ "collectionId": REPLIES_COLLECTION }],
            "orderBy": [{ "field": { "fieldPath": "timestamp" }, "direction": "ASCENDING" }],
        });
        let docs = self.run_query(&self.post_name(post_id), query).await?;
        Ok(docs.iter().map(Document::to_reply).collect())
    }

    /// Write that atomically adds one to a post's `reply_count`
    fn increment_write(&self, post_id: &str) -> Value {
        json!({
            "transform": {
                "document": self.post_name(post_id),
                "fieldTransforms": [{
                    "fieldPath": "reply_count",
                    "increment": integer_value(1),
                }],
            },
            "currentDocument": { "exists": true },
        })
    }

    /// Atomically add one to a post's reply counter.
    ///
    /// Uses the provider-side increment; the current value is never read.
    pub async fn increment_reply_count(&self, post_id: &PostId) -> Result<(), ForumError> {
        let id = checked_post_id(post_id)?;
        self.commit(vec![self.increment_write(id)])
            .await
            .map_err(|e| not_found_or_store(e, post_id))
    }
}

/// A post id must name a single document directly under the posts collection
fn checked_post_id(post_id: &PostId) -> Result<&str, ForumError> {
    let id = post_id.as_str();
    if id.is_empty() || id.contains('/') || id == "." || id == ".." {
        tracing::warn!("Rejected reply to invalid post id {:?}", id);
        return Err(ForumError::post_not_found(id));
    }
    Ok(id)
}

fn not_found_or_store(err: RemoteError, post_id: &PostId) -> ForumError {
    if err.is_missing_document() {
        ForumError::post_not_found(post_id.as_str())
    } else {
        tracing::error!("Firestore write failed: {}", err);
        err.into()
    }
}

#[async_trait]
impl PostStore for FirestoreStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    async fn insert_post(&self, post: NewPost) -> Result<PostId, ForumError> {
        let id = Self::new_document_id();
        let write = json!({
            "update": {
                "name": self.post_name(&id),
                "fields": {
                    "name": string_value(post.name()),
                    "topic": string_value(post.topic()),
                    "message": string_value(post.message()),
                    "created_at": string_value(&client_created_at()),
                    "reply_count": integer_value(0),
                },
            },
            "updateTransforms": [server_timestamp_transform()],
            "currentDocument": { "exists": false },
        });

        self.commit(vec![write]).await.map_err(|e| {
            tracing::error!("Error adding post to Firestore: {}", e);
            ForumError::from(e)
        })?;

        tracing::info!("Stored remote post {}", id);
        Ok(PostId::new(id))
    }

    async fn list_posts(&self, limit: usize) -> Result<Vec<Post>, ForumError> {
        let query = json!({
            "from": [{ "collectionId": POSTS_COLLECTION }],
            "orderBy": [{ "field": { "fieldPath": "timestamp" }, "direction": "DESCENDING" }],
            "limit": limit.min(i32::MAX as usize),
        });
        let docs = self.run_query(&self.documents_root(), query).await?;

        let reply_queries: Vec<_> = docs.iter().map(|doc| self.fetch_replies(doc.id())).collect();
        let replies: Vec<Vec<Reply>> =
            stream::iter(reply_queries)
                .buffered(MAX_CONCURRENT_REPLY_QUERIES)
                .try_collect()
                .await?;

        Ok(docs
            .iter()
            .zip(replies)
            .map(|(doc, replies)| doc.to_post(replies))
            .collect())
    }

    async fn append_reply(&self, post_id: &PostId, reply: NewReply) -> Result<(), ForumError> {
        let id = checked_post_id(post_id)?;
        let reply_name = format!(
            "{}/{}/{}",
            self.post_name(id),
            REPLIES_COLLECTION,
            Self::new_document_id()
        );
        let reply_write = json!({
            "update": {
                "name": reply_name,
                "fields": {
                    "name": string_value(reply.name()),
                    "message": string_value(reply.message()),
                    "created_at": string_value(&client_created_at()),
                },
            },
            "updateTransforms": [server_timestamp_transform()],
            "currentDocument": { "exists": false },
        });

        self.commit(vec![reply_write, self.increment_write(id)])
            .await
            .map_err(|e| not_found_or_store(e, post_id))
    }
}
