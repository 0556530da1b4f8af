//! Web API User Tests
//!
//! Integration tests for the account listing, lookup, update and delete
//! endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{
    cookie_header, create_test_server, login, register_and_login, register_user, PASSWORD,
};

#[tokio::test]
async fn test_list_users() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;
    register_user(&server, "c@d.com", "0987654321").await;

    let (name, value) = cookie_header(&session);
    let response = server.get("/api/v1/users").add_header(name, value).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], "a@b.com");
    assert_eq!(users[1]["email"], "c@d.com");
    assert!(users.iter().all(|u| u.get("password").is_none()));
}

#[tokio::test]
async fn test_get_user() {
    let (server, _db) = create_test_server().await;
    let (user, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .get(&format!("/api/v1/users/{}", user["id"]))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), user);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .get("/api/v1/users/999")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Usuario no encontrado" })
    );
}

#[tokio::test]
async fn test_get_user_non_numeric_id() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .get("/api/v1/users/abc")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "El id debe ser un número" })
    );
}

#[tokio::test]
async fn test_user_routes_require_session() {
    let (server, _db) = create_test_server().await;
    let user = register_user(&server, "a@b.com", "1234567890").await;
    let path = format!("/api/v1/users/{}", user["id"]);

    server
        .get(&path)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .patch(&path)
        .json(&json!({ "username": "nuevo" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete(&path)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_user_fields() {
    let (server, _db) = create_test_server().await;
    let (user, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .patch(&format!("/api/v1/users/{}", user["id"]))
        .add_header(name, value)
        .json(&json!({ "username": "nuevo", "phone_number": "0987654321" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["username"], "nuevo");
    assert_eq!(body["phone_number"], "0987654321");
    assert_eq!(body["email"], "a@b.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_update_password_is_rehashed() {
    let (server, db) = create_test_server().await;
    let (user, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    server
        .patch(&format!("/api/v1/users/{}", user["id"]))
        .add_header(name, value)
        .json(&json!({ "password": "nueva1234" }))
        .await
        .assert_status_ok();

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = 'a@b.com'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2id$"));

    // Old password is rejected, new one accepted
    server
        .post("/api/v1/users/login")
        .json(&json!({ "email": "a@b.com", "password": PASSWORD }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    login(&server, "a@b.com", "nueva1234").await;
}

#[tokio::test]
async fn test_update_email_taken() {
    let (server, _db) = create_test_server().await;
    let (user, session) = register_and_login(&server, "a@b.com").await;
    register_user(&server, "c@d.com", "0987654321").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .patch(&format!("/api/v1/users/{}", user["id"]))
        .add_header(name, value)
        .json(&json!({ "email": "C@D.com" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "El usuario ya existe" })
    );
}

#[tokio::test]
async fn test_update_invalid_fields() {
    let (server, _db) = create_test_server().await;
    let (user, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .patch(&format!("/api/v1/users/{}", user["id"]))
        .add_header(name, value)
        .json(&json!({ "phone_number": "12" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "El número de teléfono debe tener 10 caracteres" })
    );
}

#[tokio::test]
async fn test_update_missing_user() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    server
        .patch("/api/v1/users/999")
        .add_header(name, value)
        .json(&json!({ "username": "nuevo" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_other_user() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;
    let other = register_user(&server, "c@d.com", "0987654321").await;

    let (name, value) = cookie_header(&session);
    let response = server
        .delete(&format!("/api/v1/users/{}", other["id"]))
        .add_header(name, value)
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Usuario eliminado" })
    );

    let (name, value) = cookie_header(&session);
    server
        .get(&format!("/api/v1/users/{}", other["id"]))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The deleted account can no longer log in
    server
        .post("/api/v1/users/login")
        .json(&json!({ "email": "c@d.com", "password": PASSWORD }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user_revokes_sessions() {
    let (server, db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;
    let other = register_user(&server, "c@d.com", "0987654321").await;
    let first = login(&server, "c@d.com", PASSWORD).await;
    let second = login(&server, "c@d.com", PASSWORD).await;

    let (name, value) = cookie_header(&session);
    server
        .delete(&format!("/api/v1/users/{}", other["id"]))
        .add_header(name, value)
        .await
        .assert_status_ok();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE user_id = ?")
        .bind(other["id"].as_i64().unwrap())
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    for stale in [&first, &second] {
        let (name, value) = cookie_header(stale);
        server
            .get("/api/v1/users/user")
            .add_header(name, value)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    // The caller's own session is untouched
    let (name, value) = cookie_header(&session);
    server
        .get("/api/v1/users/user")
        .add_header(name, value)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_delete_missing_user() {
    let (server, _db) = create_test_server().await;
    let (_, session) = register_and_login(&server, "a@b.com").await;

    let (name, value) = cookie_header(&session);
    server
        .delete("/api/v1/users/999")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
