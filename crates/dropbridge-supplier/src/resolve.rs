//! The identity resolution cascade.
//!
//! Maps an arbitrary storefront line-item identifier to a supplier product
//! id. Upstream identifiers are inconsistently formatted across integration
//! revisions (raw EAN, spreadsheet-quoted EAN, short internal code, or the
//! supplier's numeric id reused as the SKU), so resolution tries a sequence
//! of strategies, each only when the previous yielded nothing:
//!
//! 1. normalize the identifier;
//! 2. look up its candidate forms in the current catalog cache;
//! 3. on a miss with a stale or absent cache, force one rebuild and retry;
//! 4. scan the first few catalog pages directly, in case the cache missed a
//!    recent catalog change;
//! 5. fall back to the trailing-digit numeric guess — an explicitly degraded
//!    result, flagged in logs so operators can see how often orders resolve
//!    by guesswork rather than confirmed match.

use crate::catalog::CatalogCache;
use crate::client::SupplierClient;
use crate::error::SupplierError;
use crate::normalize::{candidate_forms, clean_identifier, plausible_numeric_code};
use crate::types::SupplierProduct;

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Confirmed against the catalog.
    Matched(i64),
    /// Best-effort trailing-digit guess, not a confirmed match.
    Guessed(i64),
}

impl Resolution {
    #[must_use]
    pub fn product_id(self) -> i64 {
        match self {
            Self::Matched(id) | Self::Guessed(id) => id,
        }
    }

    #[must_use]
    pub fn is_guess(self) -> bool {
        matches!(self, Self::Guessed(_))
    }
}

pub struct Resolver<'a> {
    client: &'a SupplierClient,
    cache: &'a CatalogCache,
    /// Pages scanned directly against the supplier in the last-resort step.
    scan_pages: u32,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(client: &'a SupplierClient, cache: &'a CatalogCache, scan_pages: u32) -> Self {
        Self {
            client,
            cache,
            scan_pages,
        }
    }

    /// Runs the cascade for one raw identifier.
    ///
    /// Returns `Ok(None)` when every step is exhausted — the caller decides
    /// whether that is fatal (it is, for order translation).
    ///
    /// # Errors
    ///
    /// Network or supplier failures during a forced rebuild or the direct
    /// page scan propagate; the cascade does not swallow them.
    pub async fn resolve(
        &self,
        raw: &str,
        token: &str,
    ) -> Result<Option<Resolution>, SupplierError> {
        let clean = clean_identifier(raw);
        if clean.is_empty() {
            return Ok(None);
        }
        let candidates = candidate_forms(&clean);

        // Current cache, stale or not: stale-but-consistent hits are fine.
        if let Some(index) = self.cache.current().await {
            if let Some(id) = index.lookup_any(&candidates) {
                return Ok(Some(Resolution::Matched(id)));
            }
        }

        // One forced rebuild when the cache may simply be out of date.
        if self.cache.is_stale().await {
            let index = self.cache.ensure_fresh(self.client, token).await?;
            if let Some(id) = index.lookup_any(&candidates) {
                return Ok(Some(Resolution::Matched(id)));
            }
        }

        if let Some(id) = self.scan_first_pages(&candidates, token).await? {
            return Ok(Some(Resolution::Matched(id)));
        }

        if let Some(id) = plausible_numeric_code(&clean) {
            tracing::warn!(
                identifier = raw,
                product_id = id,
                "degraded resolution: trailing-digit guess, not a confirmed catalog match"
            );
            return Ok(Some(Resolution::Guessed(id)));
        }

        tracing::warn!(identifier = raw, "identifier exhausted every resolution step");
        Ok(None)
    }

    /// Bounded scan of the first catalog pages, bypassing the cache.
    async fn scan_first_pages(
        &self,
        candidates: &[String],
        token: &str,
    ) -> Result<Option<i64>, SupplierError> {
        for page in 0..self.scan_pages {
            let batch = self.client.fetch_products_page(token, page).await?;
            let last_page = batch.len() < self.client.page_size() as usize;
            if let Some(product) = batch.iter().find(|p| product_matches(p, candidates)) {
                tracing::debug!(
                    product_id = product.id,
                    page,
                    "identifier matched by direct catalog scan"
                );
                return Ok(Some(product.id));
            }
            if last_page {
                break;
            }
        }
        Ok(None)
    }
}

/// Whether any derived form of the product's identifiers intersects the
/// lookup candidates. Mirrors the registration rules of the catalog index.
fn product_matches(product: &SupplierProduct, candidates: &[String]) -> bool {
    product.raw_identifiers().iter().any(|raw| {
        let clean = clean_identifier(raw);
        !clean.is_empty() && candidate_forms(&clean).iter().any(|f| candidates.contains(f))
    })
}
