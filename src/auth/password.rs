//! Password hashing and verification for Turnero.
//!
//! Uses Argon2id. The stored value is a PHC string that embeds the salt and
//! the cost parameters it was produced with, so verification always uses the
//! parameters of the stored hash rather than the current configuration.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The configured cost parameters are not accepted by Argon2.
    #[error("invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The stored hash is structurally corrupt.
    #[error("invalid password hash format")]
    InvalidHash,
}

/// Work factor for the Argon2id hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of iterations.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for HashCost {
    /// 64 MiB, 3 iterations, 4 lanes.
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// One-way salted hasher for account passwords.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Create a hasher with the given cost.
    pub fn new(cost: HashCost) -> Result<Self, PasswordError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password.
    ///
    /// Every call uses a fresh random salt, so hashing the same plaintext
    /// twice yields two different stored values.
    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify a plaintext against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch. Only a stored value that cannot be
    /// parsed as a PHC string is reported as an error.
    pub fn verify(&self, plaintext: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHash)?;

        match self.argon2().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(_) => Err(PasswordError::InvalidHash),
        }
    }

    /// Hash on the blocking thread pool.
    pub async fn hash_async(&self, plaintext: String) -> crate::Result<String> {
        let hasher = self.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&plaintext)).await??;
        Ok(hash)
    }

    /// Verify on the blocking thread pool.
    pub async fn verify_async(&self, plaintext: String, stored: String) -> crate::Result<bool> {
        let hasher = self.clone();
        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored)).await??;
        Ok(matches)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        let cost = HashCost::default();
        Self {
            params: Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
                .unwrap_or_default(),
        }
    }
}
