/**
 * Forum Handler Types
 */
use serde::{Deserialize, Serialize};

use crate::forum::BackendMode;
use crate::identity::IdentityMode;
use crate::shared::PostId;

/// Query string of `GET /api/forum/posts`
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// Query string of `GET /api/forum/search`
#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Body of `POST /api/forum/posts`
///
/// Absent fields become empty strings and fail validation as "is required".
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /api/forum/posts/{id}/replies`
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreateReplyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatePostResponse {
    pub id: PostId,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of `GET /api/forum/status`
#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub mode: BackendMode,
    pub remote_configured: bool,
    pub configuration_error: Option<String>,
    pub identity_mode: IdentityMode,
}
