//! The single resilient HTTP client every outbound call routes through.
//!
//! Both platforms sit behind undocumented rate limits and flaky networks, so
//! one place owns the whole discipline: a fixed pacing delay before each
//! request, `Retry-After`-aware waiting on 429 (re-issuing the same request
//! without consuming the retry budget), and exponential back-off for
//! network-level failures up to a bounded number of attempts. Non-429 HTTP
//! error statuses are surfaced immediately — they indicate a request defect,
//! not transience.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, StatusCode};

use crate::error::HttpError;

/// Tuning knobs for [`ResilientClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Fixed delay inserted before the first attempt of every call.
    pub pacing_delay_ms: u64,
    /// Total attempt budget for transient network failures.
    pub max_attempts: u32,
    /// Base for the `2^attempt` back-off schedule, in seconds.
    pub backoff_base_secs: u64,
    /// Wait used for a 429 whose `Retry-After` hint is absent or unparsable.
    pub rate_limit_fallback_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "dropbridge/0.1 (storefront-supplier-sync)".to_owned(),
            pacing_delay_ms: 250,
            max_attempts: 8,
            backoff_base_secs: 1,
            rate_limit_fallback_secs: 8,
        }
    }
}

/// A fully-read HTTP response: status, headers, and body text.
///
/// The body is read eagerly so the retry loop owns the complete exchange;
/// callers parse JSON themselves with their own error context.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    /// Returns a response header as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct ResilientClient {
    client: Client,
    pacing: Duration,
    max_attempts: u32,
    backoff_base_secs: u64,
    rate_limit_fallback: Duration,
}

impl ResilientClient {
    /// Creates a client with the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &HttpClientConfig) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            pacing: Duration::from_millis(config.pacing_delay_ms),
            max_attempts: config.max_attempts.max(1),
            backoff_base_secs: config.backoff_base_secs,
            rate_limit_fallback: Duration::from_secs(config.rate_limit_fallback_secs),
        })
    }

    /// Issues one logical request, absorbing rate limiting and transient
    /// network failures.
    ///
    /// A 429 response waits out the `Retry-After` hint and re-issues the same
    /// request without counting against the attempt budget. Network-level
    /// failures are retried with `backoff_base * 2^attempt` sleeps until the
    /// budget is exhausted.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Status`] on any non-2xx, non-429 status (no retry).
    /// - [`HttpError::Network`] once the attempt budget is exhausted, or
    ///   immediately for failures that cannot be transient.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, HttpError> {
        tokio::time::sleep(self.pacing).await;

        let mut attempts = 0u32;
        loop {
            let mut request = self.client.request(method.clone(), url);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            if let Some(json) = body {
                request = request.json(json);
            }

            match Self::attempt(request).await {
                Ok(response) if response.status == StatusCode::TOO_MANY_REQUESTS => {
                    let wait = retry_after_secs(&response.headers)
                        .map_or(self.rate_limit_fallback, Duration::from_secs);
                    tracing::warn!(
                        url,
                        wait_secs = wait.as_secs(),
                        "rate limited (429), waiting before re-issuing request"
                    );
                    tokio::time::sleep(wait).await;
                    // Not counted against the retry budget.
                }
                Ok(response) if !response.status.is_success() => {
                    return Err(HttpError::Status {
                        status: response.status.as_u16(),
                        url: url.to_owned(),
                        body: response.body,
                    });
                }
                Ok(response) => return Ok(response),
                Err(source) => {
                    attempts += 1;
                    if attempts >= self.max_attempts || !is_transient(&source) {
                        return Err(HttpError::Network { attempts, source });
                    }
                    let delay_secs = self
                        .backoff_base_secs
                        .saturating_mul(1u64 << (attempts - 1).min(20));
                    tracing::warn!(
                        url,
                        attempts,
                        max_attempts = self.max_attempts,
                        delay_secs,
                        error = %source,
                        "transient network failure, retrying after back-off"
                    );
                    tokio::time::sleep(Duration::from_secs(delay_secs)).await;
                }
            }
        }
    }

    /// One send, with the body fully read. Any `reqwest::Error` here — send
    /// or body read — is a candidate for retry.
    async fn attempt(request: RequestBuilder) -> Result<HttpResponse, reqwest::Error> {
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Whether a `reqwest::Error` can plausibly succeed on re-issue.
///
/// Everything that made it past request construction (timeouts, connection
/// resets, truncated bodies) counts as a network-level failure; a builder
/// error (e.g. an unparsable URL) never will.
fn is_transient(err: &reqwest::Error) -> bool {
    !err.is_builder()
}

/// Parses a `Retry-After` header carrying whole seconds.
///
/// The HTTP-date form is not produced by either platform; an unparsable
/// value falls back to the configured default.
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}
