//! Postgres-backed product store.
//!
//! Every mutation is a single statement (`... RETURNING`), so atomicity and
//! isolation between concurrent requests are left to Postgres. Concurrent
//! updates are last-writer-wins.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::instrument;

use catalog_core::{DomainResult, ProductId};
use catalog_products::{NewProduct, Product, ProductChanges, ProductStore};

use super::StoreError;

const COLUMNS: &str = "id, name, description, price, created_at, updated_at";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(255) NOT NULL,
    description TEXT NULL,
    price       NUMERIC NOT NULL CHECK (price >= 0),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_created_at_idx ON products (created_at)";

/// Postgres-backed product store.
///
/// The pool is cheap to clone; the store itself holds no other state.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table and its index if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_CREATED_AT_INDEX).execute(&self.pool).await?;
        tracing::info!("products schema ready");
        Ok(())
    }

    async fn fetch_many(&self, sql: &str) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> DomainResult<Vec<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        Ok(self.fetch_many(&sql).await?)
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(row.as_ref().map(product_from_row).transpose()?)
    }

    #[instrument(skip(self, product), err)]
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, description, price) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(product.name)
            .bind(product.description)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(product_from_row(&row)?)
    }

    #[instrument(skip(self, changes), err)]
    async fn update_by_id(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> DomainResult<Option<Product>> {
        let sql = format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                price = COALESCE($5, price),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(id.get())
            .bind(changes.name)
            .bind(changes.description.is_some())
            .bind(changes.description.flatten())
            .bind(changes.price)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(row.as_ref().map(product_from_row).transpose()?)
    }

    #[instrument(skip(self), err)]
    async fn delete_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(row.as_ref().map(product_from_row).transpose()?)
    }

    #[instrument(skip(self), err)]
    async fn query_by_date_equals(&self, date: NaiveDate) -> DomainResult<Vec<Product>> {
        let (start, end) = utc_day_bounds(date)?;
        let sql = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE created_at >= $1 AND ($2::timestamptz IS NULL OR created_at < $2) \
             ORDER BY id"
        );
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self), err)]
    async fn query_by_name_contains(&self, fragment: &str) -> DomainResult<Vec<Product>> {
        let sql = format!(
            r"SELECT {COLUMNS} FROM products WHERE name LIKE $1 ESCAPE '\' ORDER BY id"
        );
        let rows = sqlx::query(&sql)
            .bind(contains_pattern(fragment))
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::from)?;
        Ok(rows
            .iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let raw_id: i64 = row.try_get("id")?;
    let id = ProductId::new(raw_id).map_err(|e| StoreError::CorruptRow(e.to_string()))?;

    Ok(Product {
        id,
        name: row.try_get::<String, _>("name")?,
        description: row.try_get::<Option<String>, _>("description")?,
        price: row.try_get::<Decimal, _>("price")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Half-open `[start, end)` UTC range covering `date`.
///
/// `end` is `None` for the last representable day, leaving the range open.
fn utc_day_bounds(
    date: NaiveDate,
) -> Result<(DateTime<Utc>, Option<DateTime<Utc>>), StoreError> {
    let start = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| StoreError::CorruptRow(format!("no midnight for {date}")))?
        .and_utc();
    Ok((start, start.checked_add_signed(chrono::Duration::days(1))))
}

/// `LIKE` pattern matching `fragment` anywhere, with wildcards escaped.
fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
