//! `Authorization: Bearer <token>` extraction.

use axum::http::{header::AUTHORIZATION, HeaderMap, Request};

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer token from the request, if the header uses the exact `Bearer ` scheme.
pub fn get_token_from_request<B>(request: &Request<B>) -> Option<&str> {
    bearer_token(request.headers())
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
}
