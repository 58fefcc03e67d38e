/**
 * Forum Handlers
 *
 * Thin adapters between HTTP and `ForumService`. Reads never fail at this
 * layer: the service already degrades store errors to empty results.
 * Writes surface `ForumError` through `ApiError`.
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::ApiError;
use crate::backend::forum::types::{
    CreatePostRequest, CreatePostResponse, CreateReplyRequest, ListQuery, MessageResponse,
    SearchQuery, StatusResponse,
};
use crate::forum::service::{DEFAULT_LIST_LIMIT, SEARCH_SCAN_LIMIT};
use crate::forum::ForumService;
use crate::identity::IdentityClient;
use crate::shared::Post;

/// GET /api/forum/posts
///
/// `limit` defaults to 10 and is capped at the search scan size.
pub async fn list_posts(
    State(forum): State<ForumService>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Post>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .min(SEARCH_SCAN_LIMIT);
    Json(forum.list_posts(limit).await)
}

/// POST /api/forum/posts
///
/// # Errors
///
/// * `400 Bad Request` - validation failed
/// * `503 Service Unavailable` - no store is active
/// * `500 Internal Server Error` - the store failed
///
/// # Example Request
///
/// ```http
/// POST /api/forum/posts HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "Ada", "topic": "Borrow checker", "message": "Why does this not compile?" }
/// ```
pub async fn create_post(
    State(forum): State<ForumService>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    let id = forum
        .add_post(&request.name, &request.topic, &request.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            id,
            message: "Post added successfully".to_string(),
        }),
    ))
}

/// POST /api/forum/posts/{id}/replies
///
/// # Errors
///
/// * `400 Bad Request` - validation failed
/// * `404 Not Found` - no post has this id
/// * `503` / `500` - as for [`create_post`]
pub async fn create_reply(
    State(forum): State<ForumService>,
    Path(post_id): Path<String>,
    Json(request): Json<CreateReplyRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    forum
        .add_reply(&post_id, &request.name, &request.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Reply added successfully".to_string(),
        }),
    ))
}

/// GET /api/forum/search
pub async fn search_posts(
    State(forum): State<ForumService>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Post>> {
    Json(forum.search(&query.q).await)
}

/// GET /api/forum/status
pub async fn status(
    State(forum): State<ForumService>,
    State(identity): State<IdentityClient>,
) -> Json<StatusResponse> {
    let selection = forum.selection();
    Json(StatusResponse {
        mode: selection.mode(),
        remote_configured: selection.is_remote_configured(),
        configuration_error: selection.last_configuration_error().map(str::to_string),
        identity_mode: identity.mode(),
    })
}
