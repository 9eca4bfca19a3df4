//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics, CORS, auth)
//! - Bind server to listener
//! - Drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ApiConfig, AuthConfig};
use crate::http::edge;
use crate::http::handlers;
use crate::http::middleware::{cors_middleware, require_auth};
use crate::http::request::{x_request_id, MakeRequestUuidV4};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::security::{Secret, SecretError, TokenAuthority};

/// Credentials accepted by the login endpoint.
pub struct AdminLogin {
    pub username: String,
    pub password: Secret,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenAuthority>,
    pub login: Option<Arc<AdminLogin>>,
}

impl AppState {
    pub fn new(secret: &Secret, login: Option<AdminLogin>) -> Self {
        Self {
            tokens: Arc::new(TokenAuthority::new(secret)),
            login: login.map(Arc::new),
        }
    }

    /// Read the signing secret and admin password from the environment.
    ///
    /// A missing signing secret is fatal. A missing admin password only
    /// disables login.
    pub fn from_env(auth: &AuthConfig) -> Result<Self, SecretError> {
        let secret = Secret::from_env(&auth.secret_env)?;

        let login = match Secret::from_env(&auth.admin_password_env) {
            Ok(password) => Some(AdminLogin {
                username: auth.admin_username.clone(),
                password,
            }),
            Err(_) => {
                tracing::warn!(
                    variable = %auth.admin_password_env,
                    "Admin password not configured; login endpoint disabled"
                );
                None
            }
        };

        Ok(Self::new(&secret, login))
    }
}

/// HTTP server for the API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
}

impl HttpServer {
    pub fn new(config: ApiConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { router, config }
    }

    /// Run the server until `shutdown_rx` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait_for(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ApiConfig, state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/session", get(handlers::session))
        .route("/api/auth/refresh", post(handlers::refresh))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/verify", get(handlers::verify))
        .merge(protected)
        .layer(middleware::from_fn(cors_middleware));

    let edge = Router::new()
        .route("/edge/health", get(edge::health).options(edge::health))
        .route(
            "/edge/auth/verify",
            get(edge::verify).post(edge::verify).options(edge::verify),
        );

    Router::new()
        .merge(api)
        .merge(edge)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.security.max_body_size))
        .layer(middleware::from_fn(metrics::track_requests))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id()))
        .layer(SetRequestIdLayer::new(x_request_id(), MakeRequestUuidV4))
}
