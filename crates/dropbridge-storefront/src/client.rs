//! HTTP client for the storefront Admin API.
//!
//! Covers the three surfaces the bridge needs: the paginated product/variant
//! listing (cursor in the `Link` header), the location listing (a single
//! default fulfillment location is assumed), and the inventory-level set
//! call. Authentication is a static access token header; rate limiting and
//! transient failures are absorbed by the resilient client underneath.

use reqwest::Method;

use dropbridge_http::ResilientClient;

use crate::error::StorefrontError;
use crate::pagination::next_page_cursor;
use crate::types::{LocationsResponse, ProductsResponse, StorefrontProduct};

const API_VERSION: &str = "2024-10";
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Hard cap on product pages fetched in one listing pass.
pub(crate) const MAX_PAGES: u32 = 200;

pub struct StorefrontClient {
    http: ResilientClient,
    base_url: String,
    access_token: String,
}

impl StorefrontClient {
    /// Creates a client for the given store domain, e.g.
    /// `my-shop.myshopify.com`.
    #[must_use]
    pub fn new(http: ResilientClient, domain: &str, access_token: &str) -> Self {
        Self::with_base_url(
            http,
            &format!("https://{domain}/admin/api/{API_VERSION}"),
            access_token,
        )
    }

    /// Creates a client with an explicit base URL (for tests against a mock
    /// server).
    #[must_use]
    pub fn with_base_url(http: ResilientClient, base_url: &str, access_token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    /// Fetches one page of products, returning the next-page cursor if any.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Http`] on network failure or an error status.
    /// - [`StorefrontError::Deserialize`] on an unexpected body shape.
    pub async fn fetch_products_page(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<(Vec<StorefrontProduct>, Option<String>), StorefrontError> {
        let mut url = format!("{}/products.json?limit={limit}", self.base_url);
        if let Some(cursor) = cursor {
            url.push_str("&page_info=");
            url.push_str(cursor);
        }

        let response = self
            .http
            .execute(Method::GET, &url, None, &self.auth_headers())
            .await?;
        let next = next_page_cursor(response.header("Link"));
        let parsed: ProductsResponse =
            serde_json::from_str(&response.body).map_err(|e| StorefrontError::Deserialize {
                context: "products page".to_owned(),
                source: e,
            })?;
        Ok((parsed.products, next))
    }

    /// Fetches the complete product/variant listing by following cursors.
    ///
    /// # Errors
    ///
    /// Propagates the first page failure unchanged, plus
    /// [`StorefrontError::PaginationLimit`] on a cursor that never ends.
    pub async fn fetch_all_products(
        &self,
        limit: u32,
    ) -> Result<Vec<StorefrontProduct>, StorefrontError> {
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_PAGES {
            let (products, next) = self.fetch_products_page(limit, cursor.as_deref()).await?;
            all.extend(products);
            match next {
                Some(c) => cursor = Some(c),
                None => {
                    tracing::debug!(products = all.len(), "storefront listing fetched");
                    return Ok(all);
                }
            }
        }
        Err(StorefrontError::PaginationLimit {
            max_pages: MAX_PAGES,
        })
    }

    /// Returns the store's default fulfillment location id (the first entry
    /// of the location listing).
    ///
    /// # Errors
    ///
    /// [`StorefrontError::NoLocation`] when the store has none.
    pub async fn default_location(&self) -> Result<i64, StorefrontError> {
        let url = format!("{}/locations.json", self.base_url);
        let response = self
            .http
            .execute(Method::GET, &url, None, &self.auth_headers())
            .await?;
        let parsed: LocationsResponse =
            serde_json::from_str(&response.body).map_err(|e| StorefrontError::Deserialize {
                context: "locations".to_owned(),
                source: e,
            })?;
        parsed
            .locations
            .first()
            .map(|l| l.id)
            .ok_or(StorefrontError::NoLocation)
    }

    /// Sets the available quantity for one inventory item at one location.
    ///
    /// # Errors
    ///
    /// [`StorefrontError::Http`] on network failure or an error status.
    pub async fn set_inventory_level(
        &self,
        inventory_item_id: i64,
        location_id: i64,
        available: i64,
    ) -> Result<(), StorefrontError> {
        let url = format!("{}/inventory_levels/set.json", self.base_url);
        let body = serde_json::json!({
            "location_id": location_id,
            "inventory_item_id": inventory_item_id,
            "available": available,
        });
        self.http
            .execute(Method::POST, &url, Some(&body), &self.auth_headers())
            .await?;
        Ok(())
    }

    fn auth_headers(&self) -> [(&str, &str); 1] {
        [(ACCESS_TOKEN_HEADER, self.access_token.as_str())]
    }
}
