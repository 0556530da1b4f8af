//! Credential verification.
//!
//! Resolves an email/password pair to a user or to the reason it was
//! rejected. The reason is kept for logging only: [`VerificationOutcome::into_identity`]
//! collapses an unknown email and a wrong password into the same error.

use std::sync::Arc;

use tracing::debug;

use super::CredentialHasher;
use crate::db::{canonical_email, IdentityStore, User};
use crate::{Result, TurneroError};

/// Message for a login attempt without a password.
pub const MISSING_PASSWORD: &str = "La contraseña es requerida";

const DECOY_PASSWORD: &str = "turnero-decoy-password";

/// Result of checking a credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Email and password match a registered user.
    Verified(User),
    /// No user has this email.
    NotFound,
    /// The user exists but the password does not match.
    InvalidPassword,
    /// The password was empty.
    MissingPassword,
}

impl VerificationOutcome {
    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationOutcome::Verified(_) => "verified",
            VerificationOutcome::NotFound => "not_found",
            VerificationOutcome::InvalidPassword => "invalid_password",
            VerificationOutcome::MissingPassword => "missing_password",
        }
    }

    /// Convert into the verified user or the caller-facing error.
    pub fn into_identity(self) -> Result<User> {
        match self {
            VerificationOutcome::Verified(user) => Ok(user),
            VerificationOutcome::NotFound | VerificationOutcome::InvalidPassword => {
                Err(TurneroError::InvalidCredential)
            }
            VerificationOutcome::MissingPassword => {
                Err(TurneroError::MissingField(MISSING_PASSWORD.to_string()))
            }
        }
    }
}

/// Checks email/password pairs against the identity store.
#[derive(Clone)]
pub struct CredentialVerifier {
    identities: Arc<dyn IdentityStore>,
    hasher: CredentialHasher,
    decoy_hash: String,
}

impl CredentialVerifier {
    /// Create a verifier.
    ///
    /// Hashes a decoy password up front; unknown emails are verified against
    /// it so they take as long as a wrong password for a known email.
    pub fn new(identities: Arc<dyn IdentityStore>, hasher: CredentialHasher) -> Result<Self> {
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?;
        Ok(Self {
            identities,
            hasher,
            decoy_hash,
        })
    }

    /// Verify a credential pair.
    ///
    /// Store and hashing failures are errors; every rejection is an outcome.
    pub async fn verify(&self, email: &str, plaintext: &str) -> Result<VerificationOutcome> {
        let email = canonical_email(email);
        let outcome = match self.identities.find_by_email(&email).await? {
            None => {
                self.hasher
                    .verify_async(plaintext.to_string(), self.decoy_hash.clone())
                    .await?;
                VerificationOutcome::NotFound
            }
            Some(_) if plaintext.is_empty() => VerificationOutcome::MissingPassword,
            Some(user) => {
                let matches = self
                    .hasher
                    .verify_async(plaintext.to_string(), user.password.clone())
                    .await?;
                if matches {
                    VerificationOutcome::Verified(user)
                } else {
                    VerificationOutcome::InvalidPassword
                }
            }
        };

        debug!(outcome = outcome.kind(), "Credential verification finished");
        Ok(outcome)
    }
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier").finish_non_exhaustive()
    }
}
