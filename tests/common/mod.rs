//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use orbit_api::config::ApiConfig;
use orbit_api::http::{build_router, AdminLogin, AppState, HttpServer};
use orbit_api::lifecycle::Shutdown;
use orbit_api::security::Secret;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub fn test_state() -> AppState {
    let secret = Secret::new(TEST_SECRET).unwrap();
    let login = AdminLogin {
        username: ADMIN_USER.to_string(),
        password: Secret::new(ADMIN_PASSWORD).unwrap(),
    };
    AppState::new(&secret, Some(login))
}

/// Send one request through a fresh router.
#[allow(dead_code)]
pub async fn send(state: AppState, request: Request<Body>) -> Response<Body> {
    build_router(&ApiConfig::default(), state)
        .oneshot(request)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Start a real server on an ephemeral port. Dropping or triggering the
/// returned `Shutdown` stops it.
#[allow(dead_code)]
pub async fn start_server(state: AppState) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ApiConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, state);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
