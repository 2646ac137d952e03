use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use catalog_core::{DomainResult, ProductId};
use catalog_products::{NewProduct, Product, ProductChanges, ProductStore};

use super::StoreError;

/// Source of "now" for timestamp assignment.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<ProductId, Product>,
}

/// In-memory product store.
///
/// Intended for tests/dev. Ids come from a counter that only grows, so a
/// deleted id is never handed out again. Id assignment and insert happen under
/// the same write lock.
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
    clock: Clock,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::with_clock(Box::new(Utc::now))
    }

    /// Use a custom clock (tests pin creation dates with this).
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> DomainResult<Vec<Product>> {
        let inner = self.read()?;
        Ok(inner.rows.values().filter(|p| keep(p)).cloned().collect())
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryProductStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let now = (self.clock)();
        let mut inner = self.write()?;

        let next = inner.last_id.checked_add(1).ok_or(StoreError::IdExhausted)?;
        let id = ProductId::new(next)?;
        inner.last_id = next;

        let record = Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> DomainResult<Option<Product>> {
        let now = (self.clock)();
        let mut inner = self.write()?;

        Ok(inner.rows.get_mut(&id).map(|record| {
            record.apply_changes(&changes, now);
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        Ok(self.write()?.rows.remove(&id))
    }

    async fn query_by_date_equals(&self, date: NaiveDate) -> DomainResult<Vec<Product>> {
        self.filtered(|p| p.created_on(date))
    }

    async fn query_by_name_contains(&self, fragment: &str) -> DomainResult<Vec<Product>> {
        self.filtered(|p| p.name.contains(fragment))
    }
}
