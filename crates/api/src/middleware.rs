use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use catalog_auth::JwtValidator;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Rejects requests without a valid bearer token; otherwise records the
/// principal in request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Some(token) => token,
        None => return errors::unauthorized("missing bearer token"),
    };

    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "rejected bearer token");
            return errors::unauthorized("invalid bearer token");
        }
    };

    req.extensions_mut()
        .insert(PrincipalContext::new(claims.sub));

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}

/// Access log: one event per request with method, path, status and latency.
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
