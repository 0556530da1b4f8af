//! API handlers for the Turnero web API.

pub mod auth;
pub mod client;
pub mod user;

pub use auth::*;
pub use client::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::{CredentialHasher, CredentialVerifier, SessionManager};
use crate::{Config, Database, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (the pool is internally shared).
    pub db: Database,
    /// Session lifecycle.
    pub sessions: SessionManager,
    /// Login credential checks.
    pub verifier: CredentialVerifier,
    /// Password hasher for registration and updates.
    pub hasher: CredentialHasher,
    /// Loaded configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the auth components to the database.
    pub fn new(db: Database, config: Config) -> Result<Self> {
        let hasher = CredentialHasher::new(config.auth.hash_cost())?;
        let store = Arc::new(db.clone());
        let sessions = SessionManager::new(store.clone(), store.clone(), config.session.ttl());
        let verifier = CredentialVerifier::new(store, hasher.clone())?;

        Ok(Self {
            db,
            sessions,
            verifier,
            hasher,
            config: Arc::new(config),
        })
    }
}

/// Parse a numeric path segment, answering 400 otherwise.
pub(crate) fn parse_id(raw: &str) -> std::result::Result<i64, crate::web::ApiError> {
    raw.parse()
        .map_err(|_| crate::web::ApiError::bad_request("El id debe ser un número"))
}
