//! Web API module for Turnero.
//!
//! JSON REST API for user accounts and client records, authenticated with
//! a server-side session referenced by an `HttpOnly` cookie.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
