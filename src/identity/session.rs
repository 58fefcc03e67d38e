//! Session state
//!
//! Holds the identity of whoever is signed in for one logical session.
//! Nothing here is persisted; logging out simply drops the identity.

use crate::identity::types::Identity;

/// The current user of a session, if any
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session already signed in as `identity`
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Record a successful login or signup
    pub fn establish(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Log out locally
    pub fn clear(&mut self) {
        self.identity = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.email.as_str())
    }
}
