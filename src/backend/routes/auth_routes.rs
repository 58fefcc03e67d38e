/**
 * Authentication Routes
 */
use axum::Router;

use crate::backend::auth::handlers::{get_me, login, logout, signup};
use crate::backend::server::state::AppState;

/// Add `/api/auth/*` routes to `router`
pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/signup", axum::routing::post(signup))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", axum::routing::get(get_me))
        .route("/api/auth/logout", axum::routing::post(logout))
}
