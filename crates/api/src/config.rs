//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddr { key: &'static str, value: String },

    #[error("{key} must be a positive integer, got {value}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `BIND_ADDR`
    pub bind_addr: SocketAddr,
    /// `JWT_SECRET`
    pub jwt_secret: String,
    /// `DATABASE_URL`; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// `DATABASE_MAX_CONNECTIONS`
    pub database_max_connections: u32,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddr {
                key: "BIND_ADDR",
                value: bind_addr.clone(),
            })?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            database_url: get("DATABASE_URL"),
            database_max_connections,
        })
    }
}
