//! User model for Turnero.

use std::fmt;

/// Canonical form of an email address: trimmed and lowercased.
///
/// Applied before every lookup and before every write, so uniqueness is
/// case-insensitive.
///
/// # Examples
///
/// ```
/// use turnero::db::canonical_email;
///
/// assert_eq!(canonical_email("  Ana@Example.COM "), "ana@example.com");
/// ```
pub fn canonical_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A registered account.
///
/// Deliberately not `Serialize`: responses go through
/// [`crate::web::dto::UserInfo`], which has no password field.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login email (unique, canonical form).
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Password hash (Argon2id PHC string).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone_number", &self.phone_number)
            .field("password", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Display handle.
    pub username: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Password hash (must be pre-hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            phone_number: phone_number.into(),
            password: password_hash.into(),
        }
    }
}

/// Data for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New email.
    pub email: Option<String>,
    /// New display handle.
    pub username: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New password hash.
    pub password: Option<String>,
}

impl UserUpdate {
    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.username.is_none()
            && self.phone_number.is_none()
            && self.password.is_none()
    }
}
