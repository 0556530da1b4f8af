//! Authentication module for Turnero.
//!
//! Password hashing, credential verification, the session identity
//! mapping, the authorization gate, and account registration.

mod gate;
mod password;
mod registration;
mod session;
mod verification;

#[cfg(test)]
pub(crate) mod testing;

pub use gate::AuthState;
pub use password::{CredentialHasher, HashCost, PasswordError};
pub use registration::{register, update_profile, ProfileChanges, RegistrationRequest};
pub use session::{SessionCodec, SessionManager};
pub use verification::{CredentialVerifier, VerificationOutcome, MISSING_PASSWORD};
