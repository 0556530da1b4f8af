//! Test helpers for the web API integration tests.
//!
//! Builds an in-memory server with a cheap hash cost and handles the
//! session cookie by hand.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use turnero::web::{create_router, AppState};
use turnero::{Config, Database};

/// Name of the session cookie in the default configuration.
pub const COOKIE_NAME: &str = "turnero.sid";

/// Password used by [`register_user`].
pub const PASSWORD: &str = "hola1234";

/// Default configuration with a fast hash cost.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.hash_memory_kib = 1024;
    config.auth.hash_iterations = 1;
    config.auth.hash_parallelism = 1;
    config
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(test_config()).await
}

/// Create a test server with a custom configuration.
pub async fn create_test_server_with(config: Config) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let app_state = AppState::new(db.clone(), config).expect("Failed to build app state");
    let router = create_router(Arc::new(app_state));
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// `Cookie` request header carrying a session ID.
pub fn cookie_header(session_id: &str) -> (HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("{COOKIE_NAME}={session_id}"))
        .expect("valid cookie header");
    (COOKIE, value)
}

/// Raw `Set-Cookie` header of a response, if any.
pub fn set_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Session ID set by a response, if any.
pub fn session_id(response: &TestResponse) -> Option<String> {
    let header = set_cookie(response)?;
    let pair = header.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    (name.trim() == COOKIE_NAME && !value.is_empty()).then(|| value.to_string())
}

/// Register a user with [`PASSWORD`] and return the response body.
pub async fn register_user(server: &TestServer, email: &str, phone: &str) -> Value {
    let response = server
        .post("/api/v1/users/register")
        .json(&json!({
            "username": "prueba",
            "password": PASSWORD,
            "email": email,
            "phone_number": phone,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in and return the session ID.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/users/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    session_id(&response).expect("login sets the session cookie")
}

/// Register a user and log in, returning the user body and session ID.
pub async fn register_and_login(server: &TestServer, email: &str) -> (Value, String) {
    let user = register_user(server, email, "1234567890").await;
    let session = login(server, email, PASSWORD).await;
    (user, session)
}
