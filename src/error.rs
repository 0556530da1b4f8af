//! Error types for Turnero.

use thiserror::Error;

use crate::auth::PasswordError;

/// Common error type for Turnero.
#[derive(Error, Debug)]
pub enum TurneroError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found. The message is safe to show to the caller.
    #[error("{0}")]
    NotFound(String),

    /// Credentials did not match a registered identity.
    ///
    /// Unknown email and wrong password both end up here so callers cannot
    /// tell them apart.
    #[error("invalid credentials")]
    InvalidCredential,

    /// A required credential field was absent.
    #[error("{0}")]
    MissingField(String),

    /// Uniqueness violation on create/update. The message is safe to show.
    #[error("{0}")]
    Conflict(String),

    /// The request carries no authenticated identity.
    #[error("unauthorized")]
    Unauthorized,

    /// Password hashing primitive failure.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Any other internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TurneroError {
    /// Convert a sqlx error, mapping unique-constraint violations to
    /// [`TurneroError::Conflict`] with the given message.
    pub fn from_write(e: sqlx::Error, conflict_message: &str) -> Self {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                TurneroError::Conflict(conflict_message.to_string())
            }
            other => TurneroError::from(other),
        }
    }

    /// Whether this error is an internal failure rather than a caller mistake.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            TurneroError::Database(_)
                | TurneroError::Io(_)
                | TurneroError::Config(_)
                | TurneroError::Password(_)
                | TurneroError::Internal(_)
        )
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for TurneroError {
    fn from(e: sqlx::Error) -> Self {
        TurneroError::Database(e.to_string())
    }
}

impl From<tokio::task::JoinError> for TurneroError {
    fn from(e: tokio::task::JoinError) -> Self {
        TurneroError::Internal(format!("blocking task failed: {e}"))
    }
}

/// Result type alias for Turnero operations.
pub type Result<T> = std::result::Result<T, TurneroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_display() {
        let err = TurneroError::NotFound("Usuario no encontrado".to_string());
        assert_eq!(err.to_string(), "Usuario no encontrado");
    }

    #[test]
    fn test_invalid_credential_display_is_generic() {
        assert_eq!(
            TurneroError::InvalidCredential.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = TurneroError::Validation("username too long".to_string());
        assert_eq!(err.to_string(), "validation error: username too long");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TurneroError = io_err.into();
        assert!(matches!(err, TurneroError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_write_non_unique_is_database() {
        let err = TurneroError::from_write(sqlx::Error::RowNotFound, "dup");
        assert!(matches!(err, TurneroError::Database(_)));
    }

    #[test]
    fn test_is_internal() {
        assert!(TurneroError::Database("x".into()).is_internal());
        assert!(TurneroError::Internal("x".into()).is_internal());
        assert!(!TurneroError::Unauthorized.is_internal());
        assert!(!TurneroError::InvalidCredential.is_internal());
        assert!(!TurneroError::Conflict("x".into()).is_internal());
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(TurneroError::Unauthorized)
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
