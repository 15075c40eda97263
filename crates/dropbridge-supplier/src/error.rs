use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupplierError {
    /// Network failure or unexpected HTTP status, already retried where
    /// transient by the resilient client.
    #[error(transparent)]
    Http(#[from] dropbridge_http::HttpError),

    /// The supplier rejected the credentials or returned no token. Fatal for
    /// the current operation; the next trigger starts over with a fresh login.
    #[error("supplier login failed: {0}")]
    Auth(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The supplier accepted the HTTP call but reported line-level errors in
    /// the response body. A data problem, not transience — never retried.
    #[error("supplier rejected order {order_number}: {details}")]
    Rejected {
        order_number: String,
        details: String,
    },

    /// Catalog pagination never hit the end-of-catalog sentinel.
    #[error("catalog pagination exceeded {max_pages} pages")]
    PaginationLimit { max_pages: u32 },
}
