//! User account handlers.
//!
//! Every handler here requires a logged-in session. Any authenticated user
//! may read, update or delete any account.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{parse_id, AppState};
use crate::auth;
use crate::db::{SessionRepository, UserRepository};
use crate::web::dto::{MessageResponse, UpdateUserRequest, UserInfo, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

const USER_NOT_FOUND: &str = "Usuario no encontrado";

/// GET /api/v1/users - List all users.
pub async fn list_users(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserInfo>>, ApiError> {
    let users = UserRepository::new(state.db.pool()).list().await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// GET /api/v1/users/:id - Get a user by ID.
pub async fn get_user(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserInfo>, ApiError> {
    let id = parse_id(&id)?;
    let user = UserRepository::new(state.db.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(Json(UserInfo::from(user)))
}

/// PATCH /api/v1/users/:id - Update a user.
pub async fn update_user(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserInfo>, ApiError> {
    let id = parse_id(&id)?;
    let repo = UserRepository::new(state.db.pool());
    let user = auth::update_profile(&repo, &state.hasher, id, req.into()).await?;

    Ok(Json(UserInfo::from(user)))
}

/// DELETE /api/v1/users/:id - Delete a user.
///
/// The user's sessions are revoked first.
pub async fn delete_user(
    CurrentUser(actor): CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    let revoked = SessionRepository::new(state.db.pool())
        .delete_all_for_user(id)
        .await?;
    let deleted = UserRepository::new(state.db.pool()).delete(id).await?;
    if !deleted {
        return Err(ApiError::not_found(USER_NOT_FOUND));
    }

    tracing::info!(
        user_id = id,
        deleted_by = actor.id,
        sessions_revoked = revoked,
        "User deleted"
    );
    Ok(Json(MessageResponse::new("Usuario eliminado")))
}
