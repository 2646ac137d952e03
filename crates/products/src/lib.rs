//! Product catalog domain module.
//!
//! This crate holds the `Product` record, the typed inputs accepted by the
//! catalog, the `ProductStore` repository contract and the transport-agnostic
//! `CatalogService` that REST and GraphQL both call into. No IO lives here.

pub mod product;
pub mod service;
pub mod store;

pub use product::{
    double_option, NewProduct, Product, ProductChanges, DESCRIPTION_MAX_LEN, NAME_MAX_LEN,
};
pub use service::CatalogService;
pub use store::ProductStore;
