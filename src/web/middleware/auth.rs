//! Session authentication middleware and extractors.
//!
//! [`resolve_session`] runs once per request: it reads the session cookie,
//! resolves it to an [`AuthState`] and stores the result in the request
//! extensions. Handlers then ask for [`CurrentUser`] (rejects anonymous
//! requests with 401) or [`SessionAuth`] (never rejects).

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::AuthState;
use crate::db::User;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Session information attached to every request.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Raw session cookie value, whether or not it is still valid.
    pub session_id: Option<String>,
    /// Resolved authentication state.
    pub auth: AuthState,
}

/// Middleware resolving the session cookie into a [`SessionContext`].
///
/// A store failure is answered with 500; a missing, unknown or expired
/// session simply yields an anonymous context.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let session_id = jar
        .get(&state.config.session.cookie_name)
        .map(|c| c.value().to_string());

    let auth = match state.sessions.authenticate(session_id.as_deref()).await {
        Ok(auth) => auth,
        Err(e) => return ApiError::from(e).into_response(),
    };

    request
        .extensions_mut()
        .insert(SessionContext { session_id, auth });
    next.run(request).await
}

fn session_context(parts: &Parts) -> SessionContext {
    parts
        .extensions
        .get::<SessionContext>()
        .cloned()
        .unwrap_or_default()
}

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler. Put it before
/// any body extractor so anonymous requests are rejected first.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = session_context(parts);
        let user = context.auth.require_authenticated()?;
        Ok(CurrentUser(user.clone()))
    }
}

/// Optional session extractor. Never rejects.
#[derive(Debug, Clone)]
pub struct SessionAuth(pub SessionContext);

#[async_trait]
impl<S> FromRequestParts<S> for SessionAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionAuth(session_context(parts)))
    }
}

/// Gate for account registration.
///
/// Passes anonymous requests unless `auth.registration_requires_session` is
/// set, in which case it behaves like [`CurrentUser`].
#[derive(Debug, Clone)]
pub struct RegistrationAccess;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RegistrationAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if state.config.auth.registration_requires_session {
            session_context(parts).auth.require_authenticated()?;
        }
        Ok(RegistrationAccess)
    }
}
