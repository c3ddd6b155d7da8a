//! Unverified JWT payload decoding for display purposes

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ApiError, Result};

/// Claims read from a token payload. The signature is not checked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Subject (the account the token was issued for)
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiry as Unix timestamp
    #[serde(default)]
    pub exp: Option<i64>,

    /// Issue time as Unix timestamp
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }

    /// True once the expiry has passed; tokens without `exp` never expire
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// Decode the payload segment of `header.payload.signature`
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidToken.into());
    }

    let payload = parts[1].trim_end_matches('=');
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ApiError::InvalidToken)?;

    let claims: TokenClaims =
        serde_json::from_slice(&bytes).map_err(|_| ApiError::InvalidToken)?;
    Ok(claims)
}
