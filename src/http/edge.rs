//! Edge-style handlers.
//!
//! Each handler takes the whole request and returns a complete response,
//! attaching the headers from `set_cors_headers_edge` itself. These routes
//! are not wrapped by the traditional CORS middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::handlers::{HealthStatus, VerifyResponse};
use crate::http::server::AppState;
use crate::security::set_cors_headers_edge;

pub async fn health(request: Request<Body>) -> Response {
    let cors = set_cors_headers_edge(&request);
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, cors).into_response();
    }

    let body = HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };
    (cors, Json(body)).into_response()
}

pub async fn verify(State(state): State<AppState>, request: Request<Body>) -> Response {
    let cors = set_cors_headers_edge(&request);
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, cors).into_response();
    }

    let body = VerifyResponse {
        authenticated: state.tokens.is_authorized(&request),
    };
    (cors, Json(body)).into_response()
}
