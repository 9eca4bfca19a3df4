//! Process-wide signing secret.

use std::fmt;

use thiserror::Error;

/// Secrets shorter than this are accepted but logged as weak.
pub const RECOMMENDED_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("environment variable {0} is not set")]
    Missing(String),

    #[error("environment variable {0} is empty")]
    Empty(String),
}

/// HMAC key shared by token signing and verification.
///
/// Read once at startup. There is no built-in fallback value: a missing
/// secret is a startup error.
#[derive(Clone)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let bytes = value.into();
        if bytes.is_empty() {
            return Err(SecretError::Empty("<inline>".to_string()));
        }
        Ok(Self(bytes))
    }

    /// Load the secret from the named environment variable.
    pub fn from_env(var: &str) -> Result<Self, SecretError> {
        let value = std::env::var(var).map_err(|_| SecretError::Missing(var.to_string()))?;
        if value.trim().is_empty() {
            return Err(SecretError::Empty(var.to_string()));
        }

        if value.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                variable = var,
                length = value.len(),
                recommended = RECOMMENDED_SECRET_LEN,
                "Signing secret is shorter than recommended"
            );
        }

        Ok(Self(value.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
