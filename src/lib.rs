//! Turnero - user accounts and client records for a turn-booking service.
//!
//! A JSON REST API with cookie sessions, backed by SQLite.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    AuthState, CredentialHasher, CredentialVerifier, HashCost, PasswordError, SessionManager,
    VerificationOutcome,
};
pub use config::Config;
pub use db::{Client, Database, NewClient, NewUser, User, UserRepository, UserUpdate};
pub use error::{Result, TurneroError};
pub use web::WebServer;
