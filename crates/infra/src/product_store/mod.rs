//! Product store implementations.
//!
//! Both back the `ProductStore` contract from `catalog-products`:
//! - [`InMemoryProductStore`] for tests/dev
//! - [`PostgresProductStore`] for durable deployments

pub mod error;
pub mod in_memory;
pub mod postgres;

pub use error::StoreError;
pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
