use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Network failure or unexpected HTTP status, already retried where
    /// transient by the resilient client.
    #[error(transparent)]
    Http(#[from] dropbridge_http::HttpError),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The store has no fulfillment location to write inventory against.
    #[error("storefront reports no fulfillment locations")]
    NoLocation,

    /// Cursor pagination never terminated.
    #[error("product pagination exceeded {max_pages} pages")]
    PaginationLimit { max_pages: u32 },
}
