/**
 * Session Registry
 *
 * Maps opaque bearer tokens to the `Session` of whoever signed in with them.
 * Tokens are random UUIDs; nothing is signed and nothing is persisted.
 */
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::identity::{Identity, Session};

/// How long a token stays valid after sign-in
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    session: Session,
    issued_at: Instant,
}

impl Entry {
    fn is_live(&self, ttl: Duration) -> bool {
        self.issued_at.elapsed() < ttl
    }
}

/// Shared token → session map
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(SESSION_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
        }
    }

    /// Start a session for `identity` and return its token.
    ///
    /// Expired sessions are dropped here, so the map only holds live ones
    /// plus whatever expired since the last sign-in.
    pub async fn create(&self, identity: Identity) -> String {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(self.ttl));
        if sessions.len() < before {
            tracing::debug!("Dropped {} expired sessions", before - sessions.len());
        }
        sessions.insert(
            token.clone(),
            Entry {
                session: Session::signed_in(identity),
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// Identity bound to `token`, if the session exists, is signed in and
    /// has not expired
    pub async fn get(&self, token: &str) -> Option<Identity> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(entry) if entry.is_live(self.ttl) => {
                    return entry.session.identity().cloned();
                }
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// Log the session out. Returns whether the token was known.
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
