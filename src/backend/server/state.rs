/**
 * Application State Management
 *
 * `AppState` holds everything a handler may need. The `FromRef`
 * implementations let handlers extract only the part they use, e.g.
 * `State(forum): State<ForumService>`.
 *
 * All parts are cheap to clone: the forum service shares its store through
 * an `Arc`, the identity client shares its HTTP connection pool, and the
 * session registry is an `Arc<RwLock<_>>`.
 */
use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionRegistry;
use crate::forum::ForumService;
use crate::identity::IdentityClient;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Forum operations over the store chosen at startup
    pub forum: ForumService,

    /// Identity provider client (configured or demo)
    pub identity: IdentityClient,

    /// Signed-in sessions keyed by bearer token
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn new(forum: ForumService, identity: IdentityClient) -> Self {
        Self {
            forum,
            identity,
            sessions: SessionRegistry::new(),
        }
    }
}

impl FromRef<AppState> for ForumService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.forum.clone()
    }
}

impl FromRef<AppState> for IdentityClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.identity.clone()
    }
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
