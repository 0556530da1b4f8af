//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_client, current_user, delete_user, get_client, get_client_by_email,
    get_client_by_phone, get_user, list_clients, list_users, login, logout, register, update_user,
    AppState,
};
use super::middleware::{create_cors_layer, resolve_session, security_headers};

/// Create the main API router.
///
/// Route-level authorization is done by the handlers' extractors; this
/// layer stack only resolves the session for every request.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let user_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout).get(logout))
        .route("/user", get(current_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user));

    let client_routes = Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/:id", get(get_client))
        .route("/email/:email", get(get_client_by_email))
        .route("/phone_number/:phone", get(get_client_by_phone));

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/clients", client_routes);

    let cors_layer = create_cors_layer(&app_state.config.web.cors_origins);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer)
                .layer(middleware::from_fn(security_headers))
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    resolve_session,
                )),
        )
        .with_state(app_state)
        .merge(create_health_router())
        .layer(CompressionLayer::new())
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
