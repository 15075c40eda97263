pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod resolve;
pub mod types;

pub use catalog::{CatalogCache, CatalogEntry, CatalogIndex};
pub use client::SupplierClient;
pub use error::SupplierError;
pub use resolve::{Resolution, Resolver};
pub use types::{
    OrderResult, StockLevel, SupplierOrderLine, SupplierOrderRequest, SupplierProduct,
};
