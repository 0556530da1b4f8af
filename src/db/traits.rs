//! Storage seams consumed by the authentication core.
//!
//! The auth components never touch the pool directly. They receive an
//! `Arc<dyn IdentityStore>` / `Arc<dyn SessionStore>`, which [`Database`]
//! implements and which tests replace with in-memory fakes.

use std::time::Duration;

use axum::async_trait;

use super::session::{SessionRecord, SessionRepository};
use super::user::User;
use super::{Database, UserRepository};
use crate::Result;

/// Point lookups of identities on their unique keys.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a user by email. The email is canonicalised by the store.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// Server-held session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session for `user_id` valid for `ttl`.
    async fn create(&self, user_id: i64, ttl: Duration) -> Result<SessionRecord>;

    /// Load a session. Unknown and expired sessions are both `None`.
    async fn load(&self, id: &str) -> Result<Option<SessionRecord>>;

    /// Remove a session. Returns whether it existed.
    async fn destroy(&self, id: &str) -> Result<bool>;
}

#[async_trait]
impl IdentityStore for Database {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        UserRepository::new(self.pool()).get_by_email(email).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        UserRepository::new(self.pool()).get_by_id(id).await
    }
}

#[async_trait]
impl SessionStore for Database {
    async fn create(&self, user_id: i64, ttl: Duration) -> Result<SessionRecord> {
        SessionRepository::new(self.pool()).create(user_id, ttl).await
    }

    async fn load(&self, id: &str) -> Result<Option<SessionRecord>> {
        SessionRepository::new(self.pool()).get_valid(id).await
    }

    async fn destroy(&self, id: &str) -> Result<bool> {
        SessionRepository::new(self.pool()).delete(id).await
    }
}
