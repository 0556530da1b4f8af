//! Client record handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{parse_id, AppState};
use crate::db::{Client, ClientRepository};
use crate::web::dto::{CreateClientRequest, ValidatedJson};
use crate::web::error::ApiError;
use crate::web::middleware::CurrentUser;

const CLIENT_NOT_FOUND: &str = "Cliente no encontrado";

fn found(client: Option<Client>) -> Result<Json<Client>, ApiError> {
    client
        .map(Json)
        .ok_or_else(|| ApiError::not_found(CLIENT_NOT_FOUND))
}

/// GET /api/v1/clients - List all clients.
pub async fn list_clients(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = ClientRepository::new(state.db.pool()).list().await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/:id - Get a client by ID.
pub async fn get_client(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiError> {
    let id = parse_id(&id)?;
    found(ClientRepository::new(state.db.pool()).get_by_id(id).await?)
}

/// GET /api/v1/clients/email/:email - Get a client by email.
pub async fn get_client_by_email(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Client>, ApiError> {
    found(
        ClientRepository::new(state.db.pool())
            .get_by_email(&email)
            .await?,
    )
}

/// GET /api/v1/clients/phone_number/:phone - Get a client by phone number.
pub async fn get_client_by_phone(
    _user: CurrentUser,
    State(state): State<Arc<AppState>>,
    Path(phone): Path<String>,
) -> Result<Json<Client>, ApiError> {
    found(
        ClientRepository::new(state.db.pool())
            .get_by_phone(&phone)
            .await?,
    )
}

/// POST /api/v1/clients - Create a client. Open to anonymous callers.
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = ClientRepository::new(state.db.pool())
        .create(&req.into())
        .await?;
    tracing::info!(client_id = client.id, "Client created");

    Ok((StatusCode::CREATED, Json(client)))
}
