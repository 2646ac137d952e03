//! Bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed or badly signed token: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a raw bearer token and yields its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError>;
}

/// HMAC-SHA256 shared-secret validator.
///
/// Signature checking is done by `jsonwebtoken`; the time window is checked by
/// [`validate_claims`] against the caller-supplied `now` so tests stay
/// deterministic.
pub struct Hs256JwtValidator {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            validation,
        }
    }

    /// Sign claims with the same secret (dev tooling and tests).
    pub fn sign(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        let data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
