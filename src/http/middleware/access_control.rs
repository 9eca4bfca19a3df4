//! Access Control Middleware.
//! Guards protected routes behind a valid bearer token.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::http::request::RequestIdExt;
use crate::http::server::AppState;
use crate::security::{get_token_from_request, Claims};

/// Claims of the authenticated caller, attached to protected requests.
#[derive(Clone, Debug)]
pub struct Session(pub Claims);

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let claims = get_token_from_request(&req).and_then(|token| state.tokens.verify_token(token));

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(Session(claims));
            next.run(req).await
        }
        None => {
            tracing::debug!(
                request_id = %req.request_id(),
                path = %req.uri().path(),
                "Unauthorized request"
            );
            ApiError::Unauthorized.into_response()
        }
    }
}
