//! Client repository for Turnero.

use super::client::{Client, NewClient};
use super::user::canonical_email;
use super::DbPool;
use crate::{Result, TurneroError};

/// Message returned when a client email is already registered.
pub const CLIENT_EMAIL_TAKEN: &str = "El email ya está registrado";
/// Message returned when a client phone number is already registered.
pub const CLIENT_PHONE_TAKEN: &str = "El teléfono ya está registrado";

const CLIENT_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, address, city, notes, created_at";

/// Repository for client records.
pub struct ClientRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new ClientRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a client. Duplicate email or phone number is a conflict.
    pub async fn create(&self, new_client: &NewClient) -> Result<Client> {
        let result = sqlx::query(
            "INSERT INTO clients (first_name, last_name, email, phone_number, address, city, notes)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_client.first_name)
        .bind(&new_client.last_name)
        .bind(canonical_email(&new_client.email))
        .bind(new_client.phone_number.trim())
        .bind(&new_client.address)
        .bind(&new_client.city)
        .bind(&new_client.notes)
        .execute(self.pool)
        .await
        .map_err(conflict_for_column)?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| TurneroError::NotFound("Cliente no encontrado".to_string()))
    }

    /// Get a client by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(client)
    }

    /// Get a client by email (canonicalised before lookup).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE email = ?");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(canonical_email(email))
            .fetch_optional(self.pool)
            .await?;
        Ok(client)
    }

    /// Get a client by phone number. Surrounding whitespace is ignored, as
    /// on insert.
    pub async fn get_by_phone(&self, phone_number: &str) -> Result<Option<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE phone_number = ?");
        let client = sqlx::query_as::<_, Client>(&sql)
            .bind(phone_number.trim())
            .fetch_optional(self.pool)
            .await?;
        Ok(client)
    }

    /// List all clients ordered by ID.
    pub async fn list(&self) -> Result<Vec<Client>> {
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients ORDER BY id");
        let clients = sqlx::query_as::<_, Client>(&sql)
            .fetch_all(self.pool)
            .await?;
        Ok(clients)
    }
}

// SQLite reports the offending column as "UNIQUE constraint failed: clients.<col>".
fn conflict_for_column(e: sqlx::Error) -> TurneroError {
    let message = match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            if db_err.message().contains("clients.phone_number") {
                CLIENT_PHONE_TAKEN
            } else {
                CLIENT_EMAIL_TAKEN
            }
        }
        _ => return TurneroError::from(e),
    };
    TurneroError::Conflict(message.to_string())
}
