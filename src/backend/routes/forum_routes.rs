/**
 * Forum Routes
 */
use axum::Router;

use crate::backend::forum::handlers::{
    create_post, create_reply, list_posts, search_posts, status,
};
use crate::backend::server::state::AppState;

/// Add `/api/forum/*` routes to `router`
pub fn configure_forum_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/forum/posts",
            axum::routing::get(list_posts).post(create_post),
        )
        .route(
            "/api/forum/posts/{id}/replies",
            axum::routing::post(create_reply),
        )
        .route("/api/forum/search", axum::routing::get(search_posts))
        .route("/api/forum/status", axum::routing::get(status))
}
