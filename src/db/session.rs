//! Login session repository for Turnero.
//!
//! A session row is the server-side half of the session cookie: the cookie
//! carries the random `id`, the row carries the user it belongs to and when
//! it stops being valid.

use std::time::Duration;

use uuid::Uuid;

use super::DbPool;
use crate::Result;

const SQL_NOW: &str = "datetime('now')";

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SessionRecord {
    /// Session ID (UUID v4), the value of the session cookie.
    pub id: String,
    /// Authenticated user.
    pub user_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// Repository for session rows.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a session for a user with a fresh random ID.
    pub async fn create(&self, user_id: i64, ttl: Duration) -> Result<SessionRecord> {
        let id = Uuid::new_v4().to_string();
        let record = sqlx::query_as::<_, SessionRecord>(
            "INSERT INTO sessions (id, user_id, expires_at) VALUES (?, ?, datetime('now', ?))
             RETURNING id, user_id, created_at, expires_at",
        )
        .bind(&id)
        .bind(user_id)
        .bind(format!("+{} seconds", ttl.as_secs()))
        .fetch_one(self.pool)
        .await?;

        Ok(record)
    }

    /// Get a session that has not yet expired.
    pub async fn get_valid(&self, id: &str) -> Result<Option<SessionRecord>> {
        let sql = format!(
            "SELECT id, user_id, created_at, expires_at FROM sessions
             WHERE id = ? AND expires_at > {SQL_NOW}"
        );
        let record = sqlx::query_as::<_, SessionRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(record)
    }

    /// Delete a session. Returns true if a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every session of a user.
    pub async fn delete_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete expired sessions (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let sql = format!("DELETE FROM sessions WHERE expires_at <= {SQL_NOW}");
        let result = sqlx::query(&sql).execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}
