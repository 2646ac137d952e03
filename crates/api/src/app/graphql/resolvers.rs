use async_graphql::{Context, ErrorExtensions, MaybeUndefined, Object, Result, ID};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use catalog_core::{DomainError, DomainResult, ProductId};
use catalog_products::{CatalogService, NewProduct, Product, ProductChanges};

use super::types::ProductNode;
use crate::app::dto;

pub struct QueryRoot;

pub struct MutationRoot;

fn catalog<'a>(ctx: &Context<'a>) -> Result<&'a CatalogService> {
    ctx.data::<CatalogService>()
}

fn gql_error(err: DomainError) -> async_graphql::Error {
    let code = match &err {
        DomainError::Validation(_) => "VALIDATION_ERROR",
        DomainError::InvalidId(_) => "INVALID_ID",
        DomainError::NotFound => "NOT_FOUND",
        DomainError::Unauthorized => "UNAUTHORIZED",
        DomainError::Storage(msg) => {
            tracing::error!(error = %msg, "product store failure");
            "STORAGE_ERROR"
        }
    };
    err.extend_with(|_, e| e.set("code", code))
}

fn parse_id(id: &ID) -> Result<ProductId> {
    id.parse::<ProductId>().map_err(gql_error)
}

fn parse_price(price: f64) -> DomainResult<Decimal> {
    Decimal::from_f64(price).ok_or_else(|| DomainError::validation("price must be a finite number"))
}

fn nodes(products: Vec<Product>) -> Vec<ProductNode> {
    products.into_iter().map(ProductNode::from).collect()
}

/// A missing record resolves to `null`; anything else is an error.
fn nullable(res: DomainResult<Product>) -> Result<Option<ProductNode>> {
    match res {
        Ok(product) => Ok(Some(product.into())),
        Err(DomainError::NotFound) => Ok(None),
        Err(e) => Err(gql_error(e)),
    }
}

#[Object]
impl QueryRoot {
    /// All products, ascending by id.
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<ProductNode>> {
        let products = catalog(ctx)?.list().await.map_err(gql_error)?;
        Ok(nodes(products))
    }

    /// A single product, or `null` if no record has that id.
    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductNode>> {
        let id = parse_id(&id)?;
        nullable(catalog(ctx)?.get(id).await)
    }

    /// Products created on a calendar date (`YYYY-MM-DD`, UTC).
    async fn products_by_date(&self, ctx: &Context<'_>, date: String) -> Result<Vec<ProductNode>> {
        let date = dto::parse_calendar_date(&date).ok_or_else(|| {
            async_graphql::Error::new("date must be YYYY-MM-DD")
                .extend_with(|_, e| e.set("code", "INVALID_DATE"))
        })?;
        let products = catalog(ctx)?.find_by_date(date).await.map_err(gql_error)?;
        Ok(nodes(products))
    }

    /// Products whose name contains `name`.
    async fn products_by_name(&self, ctx: &Context<'_>, name: String) -> Result<Vec<ProductNode>> {
        let products = catalog(ctx)?.find_by_name(&name).await.map_err(gql_error)?;
        Ok(nodes(products))
    }
}

#[Object]
impl MutationRoot {
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
        price: f64,
    ) -> Result<ProductNode> {
        let price = parse_price(price).map_err(gql_error)?;
        let product = catalog(ctx)?
            .create(NewProduct::new(name, description, price))
            .await
            .map_err(gql_error)?;
        Ok(product.into())
    }

    /// Returns `null` if no record has that id. Passing `description: null`
    /// clears the description; omitting it leaves it unchanged.
    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: MaybeUndefined<String>,
        price: Option<f64>,
    ) -> Result<Option<ProductNode>> {
        let id = parse_id(&id)?;
        let price = price.map(parse_price).transpose().map_err(gql_error)?;
        let description = match description {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(text) => Some(Some(text)),
        };
        let changes = ProductChanges {
            name,
            description,
            price,
        };
        nullable(catalog(ctx)?.update(id, changes).await)
    }

    /// Returns the deleted record, or `null` if no record has that id.
    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductNode>> {
        let id = parse_id(&id)?;
        nullable(catalog(ctx)?.delete(id).await)
    }
}
