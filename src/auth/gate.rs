//! Authorization gate.

use crate::db::User;
use crate::{Result, TurneroError};

/// Per-request authentication state.
///
/// Built fresh for every request from the session cookie; there is no
/// transition back once a request has been classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No session, an expired session, or a session whose user is gone.
    #[default]
    Anonymous,
    /// A session resolved to a live user.
    Authenticated(User),
}

impl AuthState {
    /// Allow the request only if it carries an authenticated user.
    pub fn require_authenticated(&self) -> Result<&User> {
        match self {
            AuthState::Authenticated(user) => Ok(user),
            AuthState::Anonymous => Err(TurneroError::Unauthorized),
        }
    }
}
