use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),

    /// Network-level failure (timeout, connection reset) that persisted
    /// through the whole retry budget.
    #[error("network failure after {attempts} attempt(s): {source}")]
    Network {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    /// A non-2xx, non-429 status. These indicate a request defect rather
    /// than transience and are never retried.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
}
