//! Repository contract for product persistence.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use catalog_core::{DomainResult, ProductId};

use crate::product::{NewProduct, Product, ProductChanges};

/// Persistent record store for products.
///
/// Implementations own identifier and timestamp assignment. Lookups that miss
/// return `Ok(None)`; only genuine store failures are errors. Collections are
/// returned in ascending id order.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Product>>;

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;

    async fn insert(&self, product: NewProduct) -> DomainResult<Product>;

    /// Returns the updated record, or `None` when no record has that id.
    async fn update_by_id(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> DomainResult<Option<Product>>;

    /// Returns the record as it was just before deletion.
    async fn delete_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;

    /// Records whose creation timestamp falls on `date` (UTC).
    async fn query_by_date_equals(&self, date: NaiveDate) -> DomainResult<Vec<Product>>;

    /// Records whose name contains `fragment` verbatim.
    async fn query_by_name_contains(&self, fragment: &str) -> DomainResult<Vec<Product>>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        (**self).find_by_id(id).await
    }

    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        (**self).insert(product).await
    }

    async fn update_by_id(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> DomainResult<Option<Product>> {
        (**self).update_by_id(id, changes).await
    }

    async fn delete_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        (**self).delete_by_id(id).await
    }

    async fn query_by_date_equals(&self, date: NaiveDate) -> DomainResult<Vec<Product>> {
        (**self).query_by_date_equals(date).await
    }

    async fn query_by_name_contains(&self, fragment: &str) -> DomainResult<Vec<Product>> {
        (**self).query_by_name_contains(fragment).await
    }
}
