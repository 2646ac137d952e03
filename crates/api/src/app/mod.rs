//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and access-layer wiring
//! - `routes/`: REST routes + handlers
//! - `graphql/`: GraphQL schema and resolvers
//! - `dto.rs`: request DTOs and path-parameter parsing
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use catalog_products::CatalogService;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod graphql;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(jwt_secret: String, catalog: CatalogService) -> Router {
    let jwt = Arc::new(catalog_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let schema = graphql::build_schema(catalog.clone());

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .route("/graphql", post(graphql::graphql_handler))
        .layer(Extension(catalog))
        .layer(Extension(schema))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(
            middleware::request_logging_middleware,
        )))
}
