use axum::Router;

pub mod products;
pub mod system;

/// Router for all authenticated REST endpoints.
pub fn router() -> Router {
    Router::new().merge(products::router())
}
