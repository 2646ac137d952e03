//! GraphQL adapter over the catalog access layer.
//!
//! Lookups and mutations on a missing record resolve to `null` instead of an
//! error; every other failure is a GraphQL error carrying an
//! `extensions.code`.

use async_graphql::{EmptySubscription, Schema};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::IntoResponse,
    Json,
};

use catalog_products::CatalogService;

use crate::app::errors;
use crate::context::PrincipalContext;

pub mod resolvers;
pub mod types;

pub use resolvers::{MutationRoot, QueryRoot};
pub use types::ProductNode;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(catalog: CatalogService) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(catalog)
        .finish()
}

/// `POST /graphql`
pub async fn graphql_handler(
    Extension(schema): Extension<CatalogSchema>,
    Extension(principal): Extension<PrincipalContext>,
    request: Result<Json<async_graphql::Request>, JsonRejection>,
) -> axum::response::Response {
    let Json(request) = match request {
        Ok(r) => r,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    tracing::debug!(
        principal_id = %principal.principal_id(),
        operation = request.operation_name.as_deref().unwrap_or("anonymous"),
        "graphql request"
    );

    let response = schema.execute(request.data(principal)).await;
    Json(response).into_response()
}
