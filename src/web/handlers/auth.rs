//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use super::AppState;
use crate::auth::{self, VerificationOutcome};
use crate::config::SessionConfig;
use crate::db::UserRepository;
use crate::web::dto::{LoginRequest, MessageResponse, RegisterRequest, UserInfo, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::{CurrentUser, RegistrationAccess, SessionAuth};
use crate::TurneroError;

fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), session_id))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure_cookie)
        .build()
}

/// POST /api/v1/users/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    _access: RegistrationAccess,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserInfo>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = auth::register(&repo, &state.hasher, req.into()).await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// POST /api/v1/users/login - Verify credentials and start a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    SessionAuth(context): SessionAuth,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserInfo>), ApiError> {
    // Checked before the lookup so the answer does not depend on the email.
    let password = match req.password {
        Some(password) if !password.is_empty() => password,
        _ => {
            let missing = TurneroError::MissingField(auth::MISSING_PASSWORD.to_string());
            return Err(missing.into());
        }
    };
    let outcome = state.verifier.verify(&req.email, &password).await?;
    if !matches!(outcome, VerificationOutcome::Verified(_)) {
        tracing::info!(outcome = outcome.kind(), "Login rejected");
    }
    let user = outcome.into_identity()?;

    let record = state
        .sessions
        .establish(&user, context.session_id.as_deref())
        .await?;
    let jar = jar.add(session_cookie(&state.config.session, record.id));

    Ok((jar, Json(UserInfo::from(user))))
}

/// POST|GET /api/v1/users/logout - End the current session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    SessionAuth(context): SessionAuth,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let session_id = context.session_id.ok_or_else(ApiError::unauthorized)?;
    state.sessions.destroy(&session_id).await?;
    tracing::info!(user_id = user.id, "User logged out");

    let jar = jar.remove(Cookie::build(state.config.session.cookie_name.clone()).path("/"));
    Ok((jar, Json(MessageResponse::new("Sesión cerrada"))))
}

/// GET /api/v1/users/user - The logged-in user.
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserInfo> {
    Json(UserInfo::from(user))
}
