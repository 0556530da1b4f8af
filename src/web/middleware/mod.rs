//! Middleware for Web API.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{resolve_session, CurrentUser, RegistrationAccess, SessionAuth, SessionContext};
pub use cors::create_cors_layer;
pub use security::security_headers;
