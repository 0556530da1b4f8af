//! User repository for Turnero.
//!
//! CRUD operations for users. Email uniqueness is enforced by the UNIQUE
//! constraint on the column; violations surface as
//! [`TurneroError::Conflict`].

use sqlx::{QueryBuilder, Sqlite};

use super::user::{canonical_email, NewUser, User, UserUpdate};
use super::DbPool;
use crate::{Result, TurneroError};

/// Message returned when an email is already registered to another user.
pub const EMAIL_TAKEN: &str = "El usuario ya existe";

const USER_COLUMNS: &str = "id, email, username, phone_number, password, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (email, username, phone_number, password) VALUES (?, ?, ?, ?)",
        )
        .bind(canonical_email(&new_user.email))
        .bind(&new_user.username)
        .bind(&new_user.phone_number)
        .bind(&new_user.password)
        .execute(self.pool)
        .await
        .map_err(|e| TurneroError::from_write(e, EMAIL_TAKEN))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| TurneroError::NotFound("Usuario no encontrado".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// Get a user by email (canonicalised before lookup).
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(canonical_email(email))
            .fetch_optional(self.pool)
            .await?;

        Ok(user)
    }

    /// List all users ordered by ID.
    pub async fn list(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(users)
    }

    /// Update a user by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated user, or None if not found.
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<Option<User>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(canonical_email(email));
        }
        if let Some(ref username) = update.username {
            separated.push("username = ");
            separated.push_bind_unseparated(username.clone());
        }
        if let Some(ref phone_number) = update.phone_number {
            separated.push("phone_number = ");
            separated.push_bind_unseparated(phone_number.clone());
        }
        if let Some(ref password) = update.password {
            separated.push("password = ");
            separated.push_bind_unseparated(password.clone());
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| TurneroError::from_write(e, EMAIL_TAKEN))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a user by ID.
    ///
    /// Returns true if a user was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
