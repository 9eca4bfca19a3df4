//! Origin guard middleware for the traditional routes.
//!
//! Headers are decided from the request before any handler runs and are
//! applied to whatever response comes back, including 401s and 404s.
//! Preflight requests are answered here and never reach a handler.

use axum::{
    body::Body,
    http::{header::ORIGIN, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::security::cors::{decide_cors_headers, set_cors_headers, MethodSet};

pub async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        set_cors_headers(&request, &mut response);
        return response;
    }

    let cors = decide_cors_headers(request.headers().get(ORIGIN), MethodSet::Traditional);
    let mut response = next.run(request).await;
    cors.apply(response.headers_mut());
    response
}
