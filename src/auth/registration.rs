//! Account registration and profile updates for Turnero.
//!
//! Both paths take a plaintext password, hash it, and store only the hash.
//! Field formats are checked by the caller before these run.

use tracing::info;

use crate::auth::CredentialHasher;
use crate::db::{NewUser, User, UserRepository, UserUpdate};
use crate::{Result, TurneroError};

/// Registration request data.
#[derive(Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub username: String,
    pub phone_number: String,
    /// Plaintext password; consumed by [`register`].
    pub password: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone_number", &self.phone_number)
            .finish_non_exhaustive()
    }
}

/// Profile changes. `None` leaves a field untouched.
#[derive(Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

impl std::fmt::Debug for ProfileChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileChanges")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("phone_number", &self.phone_number)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Register a new user.
///
/// A duplicate email surfaces as [`TurneroError::Conflict`] from the
/// store's unique constraint; there is no separate existence check.
pub async fn register(
    repo: &UserRepository<'_>,
    hasher: &CredentialHasher,
    request: RegistrationRequest,
) -> Result<User> {
    let RegistrationRequest {
        email,
        username,
        phone_number,
        password,
    } = request;

    let password_hash = hasher.hash_async(password).await?;
    let user = repo
        .create(&NewUser::new(email, username, phone_number, password_hash))
        .await?;

    info!(user_id = user.id, "New user registered");
    Ok(user)
}

/// Apply profile changes to an existing user, re-hashing a new password.
pub async fn update_profile(
    repo: &UserRepository<'_>,
    hasher: &CredentialHasher,
    user_id: i64,
    changes: ProfileChanges,
) -> Result<User> {
    let mut update = UserUpdate {
        email: changes.email,
        username: changes.username,
        phone_number: changes.phone_number,
        password: None,
    };
    if let Some(password) = changes.password {
        update.password = Some(hasher.hash_async(password).await?);
    }

    let user = repo
        .update(user_id, &update)
        .await?
        .ok_or_else(|| TurneroError::NotFound("Usuario no encontrado".to_string()))?;

    info!(user_id = user.id, "User profile updated");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::fast_hasher;
    use crate::Database;

    fn request(email: &str) -> RegistrationRequest {
        RegistrationRequest {
            email: email.to_string(),
            username: "ana".to_string(),
            phone_number: "1234567890".to_string(),
            password: "hola1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let hasher = fast_hasher();

        let user = register(&repo, &hasher, request("a@b.com")).await.unwrap();

        assert_ne!(user.password, "hola1234");
        assert!(user.password.starts_with("$argon2id$"));
        assert!(hasher.verify("hola1234", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let hasher = fast_hasher();
        register(&repo, &hasher, request("a@b.com")).await.unwrap();

        let result = register(&repo, &hasher, request("A@b.com")).await;
        assert!(matches!(result, Err(TurneroError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_profile_rehashes_password() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let hasher = fast_hasher();
        let user = register(&repo, &hasher, request("a@b.com")).await.unwrap();

        let changes = ProfileChanges {
            password: Some("nueva1234".to_string()),
            ..Default::default()
        };
        let updated = update_profile(&repo, &hasher, user.id, changes)
            .await
            .unwrap();

        assert_ne!(updated.password, user.password);
        assert!(hasher.verify("nueva1234", &updated.password).unwrap());
        assert_eq!(updated.username, "ana");
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let changes = ProfileChanges {
            username: Some("otro".to_string()),
            ..Default::default()
        };
        let result = update_profile(&repo, &fast_hasher(), 99, changes).await;
        assert!(matches!(result, Err(TurneroError::NotFound(_))));
    }

    #[test]
    fn test_debug_hides_passwords() {
        let debug = format!("{:?}", request("a@b.com"));
        assert!(!debug.contains("hola1234"));

        let changes = ProfileChanges {
            password: Some("secreto99".to_string()),
            ..Default::default()
        };
        assert!(!format!("{changes:?}").contains("secreto99"));
    }
}
