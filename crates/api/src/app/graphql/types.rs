use async_graphql::{SimpleObject, ID};
use chrono::SecondsFormat;
use rust_decimal::prelude::ToPrimitive;

use catalog_products::Product;

/// GraphQL view of a product record.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductNode {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductNode {
    fn from(p: Product) -> Self {
        Self {
            id: ID(p.id.to_string()),
            name: p.name,
            description: p.description,
            price: p.price.to_f64().unwrap_or_default(),
            created_at: p.created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            updated_at: p.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}
