/**
 * Server Initialization
 *
 * Builds the shared state from an `AppConfig` and wires it into the router.
 * The backend mode is decided here, once, for the lifetime of the process.
 */
use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;
use crate::forum::ForumService;
use crate::identity::IdentityClient;
use crate::shared::AppConfig;

/// Build the application state for `config`
///
/// Never fails: an unusable remote configuration selects the local store
/// (or the unconfigured mode, when the local fallback is disabled).
pub fn create_state(config: &AppConfig) -> AppState {
    let forum = ForumService::from_config(config);
    let identity = IdentityClient::from_config(config);

    tracing::info!(
        "Forum backend: {} (identity: {:?})",
        forum.mode(),
        identity.mode()
    );
    if let Some(reason) = forum.selection().last_configuration_error() {
        tracing::warn!("Remote store not in use: {}", reason);
    }

    AppState::new(forum, identity)
}

/// Create and configure the axum application
pub fn create_app(config: &AppConfig) -> Router {
    tracing::info!("Initializing threadboard server");
    create_router(create_state(config))
}
