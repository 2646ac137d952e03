//! Catalog access layer.
//!
//! Both transports call into [`CatalogService`]; it validates typed input,
//! delegates to the [`ProductStore`] and turns a missed lookup into an explicit
//! `DomainError::NotFound`.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use catalog_core::{DomainError, DomainResult, ProductId};

use crate::product::{NewProduct, Product, ProductChanges};
use crate::store::ProductStore;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        let products = self.store.find_all().await?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    pub async fn get(&self, id: ProductId) -> DomainResult<Product> {
        debug!(product_id = %id, "fetching product");
        self.store.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    pub async fn create(&self, input: NewProduct) -> DomainResult<Product> {
        let input = input.validate()?;
        let product = self.store.insert(input).await?;
        info!(product_id = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    pub async fn update(&self, id: ProductId, changes: ProductChanges) -> DomainResult<Product> {
        let changes = changes.validate()?;
        let product = self
            .store
            .update_by_id(id, changes)
            .await?
            .ok_or(DomainError::NotFound)?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Deletes the record and hands back its last state.
    pub async fn delete(&self, id: ProductId) -> DomainResult<Product> {
        let product = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        info!(product_id = %id, "product deleted");
        Ok(product)
    }

    pub async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Product>> {
        let products = self.store.query_by_date_equals(date).await?;
        debug!(%date, count = products.len(), "filtered products by creation date");
        Ok(products)
    }

    pub async fn find_by_name(&self, fragment: &str) -> DomainResult<Vec<Product>> {
        let products = self.store.query_by_name_contains(fragment).await?;
        debug!(fragment, count = products.len(), "filtered products by name");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    /// Store that knows a single product (id 1) and counts every call.
    #[derive(Default)]
    struct SingleRecordStore {
        calls: AtomicUsize,
    }

    impl SingleRecordStore {
        fn record() -> Product {
            let at = Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap();
            Product {
                id: ProductId::new(1).unwrap(),
                name: "Widget".to_string(),
                description: None,
                price: Decimal::new(999, 2),
                created_at: at,
                updated_at: at,
            }
        }

        fn lookup(&self, id: ProductId) -> Option<Product> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (id.get() == 1).then(Self::record)
        }
    }

    #[async_trait]
    impl ProductStore for SingleRecordStore {
        async fn find_all(&self) -> DomainResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Self::record()])
        }

        async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
            Ok(self.lookup(id))
        }

        async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Product {
                name: product.name,
                description: product.description,
                price: product.price,
                ..Self::record()
            })
        }

        async fn update_by_id(
            &self,
            id: ProductId,
            changes: ProductChanges,
        ) -> DomainResult<Option<Product>> {
            Ok(self.lookup(id).map(|mut p| {
                p.apply_changes(&changes, p.updated_at);
                p
            }))
        }

        async fn delete_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
            Ok(self.lookup(id))
        }

        async fn query_by_date_equals(&self, _date: NaiveDate) -> DomainResult<Vec<Product>> {
            Err(DomainError::storage("connection reset"))
        }

        async fn query_by_name_contains(&self, _fragment: &str) -> DomainResult<Vec<Product>> {
            Ok(vec![])
        }
    }

    fn service() -> (CatalogService, Arc<SingleRecordStore>) {
        let store = Arc::new(SingleRecordStore::default());
        (CatalogService::new(store.clone()), store)
    }

    fn id(raw: i64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_store() {
        let (svc, store) = service();
        let err = svc
            .create(NewProduct::new("", None, Decimal::ONE))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_update_never_reaches_store() {
        let (svc, store) = service();
        let err = svc
            .update(id(1), ProductChanges::default().with_price(Decimal::NEGATIVE_ONE))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_record_is_not_found_for_get_update_delete() {
        let (svc, _store) = service();

        assert_eq!(svc.get(id(2)).await.unwrap_err(), DomainError::NotFound);
        assert_eq!(
            svc.update(id(2), ProductChanges::default()).await.unwrap_err(),
            DomainError::NotFound
        );
        assert_eq!(svc.delete(id(2)).await.unwrap_err(), DomainError::NotFound);
    }

    #[tokio::test]
    async fn create_passes_normalized_input_to_store() {
        let (svc, _store) = service();
        let created = svc
            .create(NewProduct::new(" Gadget ", Some("Shiny".into()), Decimal::new(1250, 2)))
            .await
            .unwrap();

        assert_eq!(created.name, "Gadget");
        assert_eq!(created.description.as_deref(), Some("Shiny"));
        assert_eq!(created.price, Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn delete_returns_record_as_it_was() {
        let (svc, _store) = service();
        let deleted = svc.delete(id(1)).await.unwrap();
        assert_eq!(deleted, SingleRecordStore::record());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let (svc, _store) = service();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert!(matches!(
            svc.find_by_date(date).await,
            Err(DomainError::Storage(_))
        ));
    }
}
