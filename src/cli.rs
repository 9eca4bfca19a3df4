//! Maintenance commands behind `orbit-cli`.

use reqwest::header::{HeaderMap, HeaderValue, ACCESS_CONTROL_REQUEST_METHOD, AUTHORIZATION, ORIGIN};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::security::{Claims, TokenAuthority, TokenError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("claims must be a JSON object: {0}")]
    Claims(#[from] serde_json::Error),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid token header: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

/// Parse `claims_json` as a JSON object and sign it.
pub fn sign_claims(authority: &TokenAuthority, claims_json: &str) -> Result<String, CliError> {
    let payload: Claims = serde_json::from_str(claims_json)?;
    Ok(authority.sign_token(&payload)?)
}

/// Outcome of a smoke test against a running server.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub health_status: u16,
    pub preflight_status: u16,
    pub allow_origin: String,
    pub allow_methods: String,
    pub expected_origin: String,
    pub verify_status: u16,
    pub authenticated: Option<bool>,
    pub token_supplied: bool,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        let health_ok = (200..300).contains(&self.health_status);
        let preflight_ok =
            (200..300).contains(&self.preflight_status) && self.allow_origin == self.expected_origin;
        let verify_ok = (200..300).contains(&self.verify_status)
            && (!self.token_supplied || self.authenticated == Some(true));
        health_ok && preflight_ok && verify_ok
    }
}

/// Hit health, a CORS preflight from `origin`, and the verify endpoint.
pub async fn check(
    client: &reqwest::Client,
    base: &Url,
    origin: &str,
    token: Option<&str>,
) -> Result<CheckReport, CliError> {
    let health = client.get(base.join("/api/health")?).send().await?;
    let health_status = health.status().as_u16();

    let preflight = client
        .request(reqwest::Method::OPTIONS, base.join("/api/auth/verify")?)
        .header(ORIGIN, origin)
        .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .send()
        .await?;
    let preflight_status = preflight.status().as_u16();
    let allow_origin = header_str(preflight.headers(), "access-control-allow-origin");
    let allow_methods = header_str(preflight.headers(), "access-control-allow-methods");

    let mut headers = HeaderMap::new();
    if let Some(t) = token {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", t))?);
    }
    let verify = client
        .get(base.join("/api/auth/verify")?)
        .headers(headers)
        .send()
        .await?;
    let verify_status = verify.status().as_u16();
    let authenticated = verify
        .json::<Value>()
        .await
        .ok()
        .and_then(|v| v["authenticated"].as_bool());

    Ok(CheckReport {
        health_status,
        preflight_status,
        allow_origin,
        allow_methods,
        expected_origin: origin.to_string(),
        verify_status,
        authenticated,
        token_supplied: token.is_some(),
    })
}

fn header_str(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
