//! Session identity mapping and session lifecycle.
//!
//! A session stores only the user's primary key. Every request re-reads the
//! user through the [`IdentityStore`], so a deleted user's sessions stop
//! authenticating immediately.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::AuthState;
use crate::db::{IdentityStore, SessionRecord, SessionStore, User};
use crate::Result;

/// Maps users to the token kept in the session and back.
#[derive(Clone)]
pub struct SessionCodec {
    identities: Arc<dyn IdentityStore>,
}

impl SessionCodec {
    /// Create a codec backed by an identity store.
    pub fn new(identities: Arc<dyn IdentityStore>) -> Self {
        Self { identities }
    }

    /// Token to store for an authenticated user: its ID.
    pub fn on_authenticated(&self, user: &User) -> i64 {
        user.id
    }

    /// Re-read the user behind a stored token. `None` if it no longer exists.
    pub async fn resolve(&self, token: i64) -> Result<Option<User>> {
        self.identities.find_by_id(token).await
    }
}

/// Creates, resolves and destroys login sessions.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    codec: SessionCodec,
    ttl: Duration,
}

impl SessionManager {
    /// Create a session manager.
    pub fn new(
        store: Arc<dyn SessionStore>,
        identities: Arc<dyn IdentityStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            codec: SessionCodec::new(identities),
            ttl,
        }
    }

    /// Start a session for a verified user.
    ///
    /// Always issues a new session ID. A session ID the client already
    /// presented is destroyed first so it cannot be reused after login.
    pub async fn establish(&self, user: &User, previous: Option<&str>) -> Result<SessionRecord> {
        if let Some(previous) = previous {
            self.store.destroy(previous).await?;
        }

        let token = self.codec.on_authenticated(user);
        let record = self.store.create(token, self.ttl).await?;
        info!("Session established for user {}", user.id);
        Ok(record)
    }

    /// Classify a request by the session ID it carries.
    pub async fn authenticate(&self, session_id: Option<&str>) -> Result<AuthState> {
        let Some(session_id) = session_id else {
            return Ok(AuthState::Anonymous);
        };

        let Some(record) = self.store.load(session_id).await? else {
            debug!("Unknown or expired session");
            return Ok(AuthState::Anonymous);
        };

        match self.codec.resolve(record.user_id).await? {
            Some(user) => Ok(AuthState::Authenticated(user)),
            None => {
                debug!("Session refers to missing user {}", record.user_id);
                Ok(AuthState::Anonymous)
            }
        }
    }

    /// End a session. Store failures are returned to the caller.
    pub async fn destroy(&self, session_id: &str) -> Result<()> {
        if self.store.destroy(session_id).await? {
            info!("Session destroyed");
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
