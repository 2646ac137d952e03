use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PrincipalId;

/// Claims of a catalog bearer token: subject plus the registered `iat`/`exp`
/// timestamps, carried as seconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: PrincipalId,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl JwtClaims {
    pub fn new(sub: PrincipalId, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        Self {
            sub,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }
}

/// Why a correctly signed token is still refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("bearer token expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("bearer token issued in the future ({0})")]
    NotYetValid(DateTime<Utc>),

    #[error("bearer token expires before it is issued")]
    InvalidTimeWindow,
}

/// Accept `claims` only when `iat <= now < exp`.
///
/// `now` comes from the caller; `Hs256JwtValidator` passes the request time
/// after the signature has checked out.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    match (claims.issued_at, claims.expires_at) {
        (iat, exp) if exp <= iat => Err(TokenValidationError::InvalidTimeWindow),
        (iat, _) if now < iat => Err(TokenValidationError::NotYetValid(iat)),
        (_, exp) if now >= exp => Err(TokenValidationError::Expired(exp)),
        _ => Ok(()),
    }
}
