//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs whose claims are the caller's payload plus `iat`
//! and `exp`. Verification never tells the caller why a token was rejected;
//! the reason is only logged and counted.

use std::fmt;

use axum::http::Request;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, get_current_timestamp, Algorithm, DecodingKey,
    EncodingKey, Header, Validation,
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::observability::metrics;
use crate::security::bearer::get_token_from_request;
use crate::security::secret::Secret;

/// Lifetime of every issued token: 7 days.
pub const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Claims carried by a token.
pub type Claims = Map<String, Value>;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Why a token was rejected. Internal only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    Malformed,
    Expired,
    BadSignature,
    /// Signed and parseable, but a registered claim failed validation.
    InvalidClaims,
}

impl Rejection {
    fn from_kind(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::ExpiredSignature => Rejection::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => Rejection::BadSignature,
            ErrorKind::MissingRequiredClaim(_)
            | ErrorKind::InvalidAudience
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature => Rejection::InvalidClaims,
            // Token encoding errors, plus key/crypto kinds that HS256 verification never yields.
            _ => Rejection::Malformed,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Rejection::Malformed => "malformed",
            Rejection::Expired => "expired",
            Rejection::BadSignature => "bad_signature",
            Rejection::InvalidClaims => "invalid_claims",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues and validates bearer tokens under a single process secret.
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenAuthority {
    pub fn new(secret: &Secret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        // Payload claims such as `aud` are the caller's data; only expiry is enforced.
        validation.validate_aud = false;
        validation.validate_nbf = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `payload` with an expiry 7 days from now.
    pub fn sign_token(&self, payload: &Claims) -> Result<String, TokenError> {
        self.sign_token_at(payload, get_current_timestamp())
    }

    pub(crate) fn sign_token_at(&self, payload: &Claims, issued_at: u64) -> Result<String, TokenError> {
        let mut claims = payload.clone();
        claims.insert("iat".to_string(), Value::from(issued_at));
        claims.insert("exp".to_string(), Value::from(issued_at + TOKEN_TTL_SECS));

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        metrics::record_token_issued();
        Ok(token)
    }

    /// Decoded claims if the token is authentic and unexpired.
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        match self.inspect(token) {
            Ok(claims) => Some(claims),
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "Token rejected");
                metrics::record_auth_rejection(rejection.as_str());
                None
            }
        }
    }

    pub(crate) fn inspect(&self, token: &str) -> Result<Claims, Rejection> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| Rejection::from_kind(e.kind()))
    }

    /// True iff the request carries a valid bearer token.
    pub fn is_authorized<B>(&self, request: &Request<B>) -> bool {
        get_token_from_request(request)
            .and_then(|token| self.verify_token(token))
            .is_some()
    }
}

/// Strip the metadata claims so a payload can be re-signed.
pub fn payload_of(claims: &Claims) -> Claims {
    claims
        .iter()
        .filter(|(k, _)| k.as_str() != "iat" && k.as_str() != "exp")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
