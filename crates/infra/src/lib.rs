//! Infrastructure layer: product store implementations.

pub mod product_store;


pub use product_store::{InMemoryProductStore, PostgresProductStore, StoreError};
