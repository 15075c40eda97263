pub mod client;
pub mod error;
pub mod pagination;
pub mod types;

pub use client::StorefrontClient;
pub use error::StorefrontError;
pub use types::{StorefrontProduct, StorefrontVariant};
