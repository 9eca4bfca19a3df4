//! Handlers for the traditional API routes.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::Request,
    Extension, Json,
};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::http::middleware::Session;
use crate::http::server::AppState;
use crate::security::token::payload_of;
use crate::security::Claims;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyResponse {
    pub authenticated: bool,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub claims: Claims,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Exchange admin credentials for a token.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let admin = state.login.as_ref().ok_or(ApiError::NotFound)?;
    let Json(body) = body?;

    let user_ok = constant_time_eq(body.username.as_bytes(), admin.username.as_bytes());
    let pass_ok = constant_time_eq(body.password.as_bytes(), admin.password.as_bytes());
    if !(user_ok & pass_ok) {
        tracing::warn!(username = %body.username, "Login failed");
        return Err(ApiError::Unauthorized);
    }

    let payload = match json!({ "sub": admin.username, "role": "admin" }) {
        Value::Object(map) => map,
        _ => Claims::new(),
    };
    let token = state.tokens.sign_token(&payload)?;
    tracing::info!(username = %admin.username, "Login succeeded");

    Ok(Json(TokenResponse { token }))
}

pub async fn verify(State(state): State<AppState>, request: Request<Body>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        authenticated: state.tokens.is_authorized(&request),
    })
}

pub async fn session(Extension(Session(claims)): Extension<Session>) -> Json<SessionResponse> {
    Json(SessionResponse { claims })
}

/// Re-sign the caller's payload with a fresh 7-day expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Extension(Session(claims)): Extension<Session>,
) -> Result<Json<TokenResponse>> {
    let token = state.tokens.sign_token(&payload_of(&claims))?;
    Ok(Json(TokenResponse { token }))
}
