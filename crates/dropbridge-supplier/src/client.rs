//! HTTP client for the supplier's dropship API.
//!
//! Wraps the resilient client with the supplier's path-parameter style
//! endpoints and typed deserialization. The session token is requested per
//! operation and never cached: the supplier may invalidate tokens at any
//! time without notice, so correctness must not depend on reuse.

use reqwest::Method;

use dropbridge_http::ResilientClient;

use crate::error::SupplierError;
use crate::types::{OrderResult, StockLevel, SupplierOrderRequest, SupplierProduct};

/// Hard cap on catalog pages fetched in one pass. Guards against an upstream
/// that never returns a short page.
pub(crate) const MAX_PAGES: u32 = 500;

pub struct SupplierClient {
    http: ResilientClient,
    base_url: String,
    user: String,
    password: String,
    lang: String,
    page_size: u32,
}

impl SupplierClient {
    #[must_use]
    pub fn new(
        http: ResilientClient,
        base_url: &str,
        user: &str,
        password: &str,
        lang: &str,
        page_size: u32,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            user: user.to_owned(),
            password: password.to_owned(),
            lang: lang.to_owned(),
            page_size: page_size.max(1),
        }
    }

    /// Page size used by the paginated catalog endpoints. A page shorter
    /// than this is the end-of-catalog sentinel.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Obtains a fresh session token with the stored credentials.
    ///
    /// The response carries the token under `Token` or `token` depending on
    /// API revision; both are accepted.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Auth`] if the response has no token field.
    /// - [`SupplierError::Http`] on network failure or an error status.
    pub async fn login(&self) -> Result<String, SupplierError> {
        let body = serde_json::json!({"user": self.user, "password": self.password});
        let response = self
            .http
            .execute(
                Method::POST,
                &format!("{}/login", self.base_url),
                Some(&body),
                &[],
            )
            .await?;

        let value: serde_json::Value =
            serde_json::from_str(&response.body).map_err(|e| SupplierError::Deserialize {
                context: "login response".to_owned(),
                source: e,
            })?;

        value
            .get("Token")
            .or_else(|| value.get("token"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| SupplierError::Auth("login response carried no token".to_owned()))
    }

    /// Fetches one page of the product catalog.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Http`] on network failure or an error status.
    /// - [`SupplierError::Deserialize`] if the page is not a product array.
    pub async fn fetch_products_page(
        &self,
        token: &str,
        page: u32,
    ) -> Result<Vec<SupplierProduct>, SupplierError> {
        let url = format!(
            "{}/products/paging/{}/{}/{}/{}",
            self.base_url, token, page, self.page_size, self.lang
        );
        let response = self.http.execute(Method::GET, &url, None, &[]).await?;
        serde_json::from_str(&response.body).map_err(|e| SupplierError::Deserialize {
            context: format!("products page {page}"),
            source: e,
        })
    }

    /// Fetches the full catalog, paging until a page returns fewer items
    /// than the page size.
    ///
    /// # Errors
    ///
    /// Propagates the first page failure unchanged, plus
    /// [`SupplierError::PaginationLimit`] if the sentinel never appears.
    pub async fn fetch_all_products(
        &self,
        token: &str,
    ) -> Result<Vec<SupplierProduct>, SupplierError> {
        let mut all = Vec::new();
        for page in 0..MAX_PAGES {
            let batch = self.fetch_products_page(token, page).await?;
            let last_page = batch.len() < self.page_size as usize;
            all.extend(batch);
            if last_page {
                tracing::debug!(pages = page + 1, products = all.len(), "catalog fetched");
                return Ok(all);
            }
        }
        Err(SupplierError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// Fetches the supplier's current stock snapshot.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Http`] on network failure or an error status.
    /// - [`SupplierError::Deserialize`] if the body is not a stock array.
    pub async fn fetch_stock(&self, token: &str) -> Result<Vec<StockLevel>, SupplierError> {
        let url = format!("{}/stock/update/{}", self.base_url, token);
        let response = self.http.execute(Method::GET, &url, None, &[]).await?;
        serde_json::from_str(&response.body).map_err(|e| SupplierError::Deserialize {
            context: "stock snapshot".to_owned(),
            source: e,
        })
    }

    /// Submits one order. The wire format is a single-element array; the
    /// response mirrors it with one result per submitted order.
    ///
    /// # Errors
    ///
    /// - [`SupplierError::Rejected`] if the supplier reports line-level
    ///   errors or returns no result entry.
    /// - [`SupplierError::Http`] / [`SupplierError::Deserialize`] as above.
    pub async fn send_order(
        &self,
        token: &str,
        order: &SupplierOrderRequest,
    ) -> Result<OrderResult, SupplierError> {
        let url = format!("{}/orders/sendv2/{}", self.base_url, token);
        let body = serde_json::json!([order]);
        let response = self.http.execute(Method::POST, &url, Some(&body), &[]).await?;

        let results: Vec<OrderResult> =
            serde_json::from_str(&response.body).map_err(|e| SupplierError::Deserialize {
                context: format!("order submission response for {}", order.order_number),
                source: e,
            })?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| SupplierError::Rejected {
                order_number: order.order_number.clone(),
                details: "submission response carried no result entry".to_owned(),
            })?;

        if result.has_errors() {
            let details = result
                .errors
                .as_ref()
                .map_or_else(String::new, ToString::to_string);
            return Err(SupplierError::Rejected {
                order_number: order.order_number.clone(),
                details,
            });
        }

        tracing::info!(
            order_number = %order.order_number,
            booking_code = result.booking_code.as_deref().unwrap_or(""),
            "order accepted by supplier"
        );
        Ok(result)
    }
}
