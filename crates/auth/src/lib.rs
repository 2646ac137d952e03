//! `catalog-auth` — bearer credential model and verification.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod principal;
pub mod validator;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use principal::PrincipalId;
pub use validator::{AuthError, Hs256JwtValidator, JwtValidator};
