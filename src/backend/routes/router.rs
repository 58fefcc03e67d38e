/**
 * Router Configuration
 *
 * Combines all route groups into a single axum router, adds request
 * tracing, and attaches the application state.
 */
use axum::{http::StatusCode, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::forum_routes::configure_forum_routes;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured
///
/// Unknown paths answer `404 Not Found`.
pub fn create_router(app_state: AppState) -> Router {
    let router = Router::new().route("/health", axum::routing::get(|| async { "OK" }));

    let router = configure_auth_routes(router);
    let router = configure_forum_routes(router);

    router
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
