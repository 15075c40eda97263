pub mod client;
pub mod error;

pub use client::{HttpClientConfig, HttpResponse, ResilientClient};
pub use error::HttpError;
