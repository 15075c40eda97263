//! In-memory catalog cache with time-based expiry and atomic replacement.
//!
//! The catalog is the only state shared across concurrent runs. Readers take
//! an `Arc` snapshot of a fully-built [`CatalogIndex`] and keep it for the
//! duration of their run; rebuilds publish a complete replacement under a
//! write lock, so no reader ever observes a mix of old and new entries. A
//! rebuild that fails mid-pagination leaves the previous index in place.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};

use crate::client::SupplierClient;
use crate::error::SupplierError;
use crate::normalize::{candidate_forms, clean_identifier};
use crate::types::SupplierProduct;

/// Immutable snapshot of one catalog product. Superseded wholesale on cache
/// refresh, never patched in place.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub product_id: i64,
    pub display_name: String,
    /// Cleaned identifier variants this product was registered under.
    pub identifier_variants: Vec<String>,
    pub stock_quantity: i64,
    pub unit_price: Option<Decimal>,
}

/// Lookup index over one catalog snapshot.
///
/// Both maps are built together in a single pass over the product list, so
/// every entry is reachable from at least one variant key. Variant keys are
/// many-to-one; the first registration of a colliding key wins.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    variant_to_id: HashMap<String, i64>,
    entries: HashMap<i64, CatalogEntry>,
}

impl CatalogIndex {
    #[must_use]
    pub fn from_products(products: &[SupplierProduct]) -> Self {
        let mut index = Self::default();
        for product in products {
            let mut variants = Vec::new();
            for raw in product.raw_identifiers() {
                let clean = clean_identifier(&raw);
                if clean.is_empty() {
                    continue;
                }
                for form in candidate_forms(&clean) {
                    index
                        .variant_to_id
                        .entry(form)
                        .or_insert(product.id);
                }
                variants.push(clean);
            }
            index.entries.insert(
                product.id,
                CatalogEntry {
                    product_id: product.id,
                    display_name: product.description.clone(),
                    identifier_variants: variants,
                    stock_quantity: product.stock,
                    unit_price: product.price,
                },
            );
        }
        index
    }

    #[must_use]
    pub fn lookup(&self, variant: &str) -> Option<i64> {
        self.variant_to_id.get(variant).copied()
    }

    /// First candidate form with a hit, in the order given.
    #[must_use]
    pub fn lookup_any(&self, candidates: &[String]) -> Option<i64> {
        candidates.iter().find_map(|c| self.lookup(c))
    }

    #[must_use]
    pub fn entry(&self, product_id: i64) -> Option<&CatalogEntry> {
        self.entries.get(&product_id)
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variant_to_id.len()
    }

    pub fn variant_keys(&self) -> impl Iterator<Item = &str> {
        self.variant_to_id.keys().map(String::as_str)
    }
}

struct CacheState {
    index: Arc<CatalogIndex>,
    built_at: Instant,
}

/// Shared catalog cache: TTL-bounded snapshots of the supplier catalog.
pub struct CatalogCache {
    state: RwLock<Option<CacheState>>,
    /// Single-rebuild-in-flight guard; concurrent runs coalesce on one
    /// catalog download instead of racing redundant ones.
    rebuild: Mutex<()>,
    ttl: Duration,
}

impl CatalogCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: RwLock::new(None),
            rebuild: Mutex::new(()),
            ttl,
        }
    }

    /// The current index snapshot, fresh or stale. `None` until the first
    /// successful rebuild.
    pub async fn current(&self) -> Option<Arc<CatalogIndex>> {
        self.state.read().await.as_ref().map(|s| Arc::clone(&s.index))
    }

    /// Whether the cache is absent or past its TTL.
    pub async fn is_stale(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .is_none_or(|s| s.built_at.elapsed() >= self.ttl)
    }

    /// Returns a fresh index, rebuilding from the full paginated catalog if
    /// the cache is stale or was never built.
    ///
    /// # Errors
    ///
    /// A pagination failure aborts the rebuild and is returned; the previous
    /// (possibly stale) index stays published.
    pub async fn ensure_fresh(
        &self,
        client: &SupplierClient,
        token: &str,
    ) -> Result<Arc<CatalogIndex>, SupplierError> {
        if let Some(index) = self.fresh_snapshot().await {
            return Ok(index);
        }

        let _guard = self.rebuild.lock().await;
        // Another run may have finished the rebuild while we waited.
        if let Some(index) = self.fresh_snapshot().await {
            return Ok(index);
        }

        let products = client.fetch_all_products(token).await?;
        let index = Arc::new(CatalogIndex::from_products(&products));
        tracing::info!(
            products = index.product_count(),
            variants = index.variant_count(),
            "catalog cache rebuilt"
        );
        *self.state.write().await = Some(CacheState {
            index: Arc::clone(&index),
            built_at: Instant::now(),
        });
        Ok(index)
    }

    async fn fresh_snapshot(&self) -> Option<Arc<CatalogIndex>> {
        let state = self.state.read().await;
        state
            .as_ref()
            .filter(|s| s.built_at.elapsed() < self.ttl)
            .map(|s| Arc::clone(&s.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: i64, eans: &[&str], sku: Option<&str>) -> SupplierProduct {
        serde_json::from_value(json!({
            "Id": id,
            "Description": format!("product {id}"),
            "EANS": eans,
            "SKU": sku,
            "Stock": 5,
            "Price": "9.90"
        }))
        .unwrap()
    }

    #[test]
    fn index_maps_every_spelling_to_same_product() {
        let index = CatalogIndex::from_products(&[product(777, &["8436097094189"], None)]);
        for spelling in ["8436097094189", "094189", "94189"] {
            assert_eq!(
                index.lookup_any(&candidate_forms(&clean_identifier(spelling))),
                Some(777),
                "spelling {spelling} should resolve"
            );
        }
        assert_eq!(
            index.lookup_any(&candidate_forms(&clean_identifier("'8436097094189"))),
            Some(777)
        );
    }

    #[test]
    fn index_registers_numeric_id_as_variant() {
        let index = CatalogIndex::from_products(&[product(777, &[], None)]);
        assert_eq!(index.lookup("777"), Some(777));
    }

    #[test]
    fn every_entry_is_reachable_from_a_variant_key() {
        let index = CatalogIndex::from_products(&[
            product(1, &["1111111111111"], Some("A-1")),
            product(2, &[], None),
        ]);
        for id in [1i64, 2] {
            assert!(index.entry(id).is_some());
            assert!(
                index.variant_keys().any(|k| index.lookup(k) == Some(id)),
                "entry {id} unreachable"
            );
        }
    }

    #[test]
    fn colliding_variant_keys_keep_first_registration() {
        let index = CatalogIndex::from_products(&[
            product(1, &["8436097094189"], None),
            product(2, &["0000000094189"], None),
        ]);
        // Both products derive the "94189" suffix form; the first wins.
        assert_eq!(index.lookup("94189"), Some(1));
        // Literal spellings still reach their own product.
        assert_eq!(index.lookup("8436097094189"), Some(1));
        assert_eq!(index.lookup("0000000094189"), Some(2));
    }

    #[test]
    fn rebuild_from_same_products_is_idempotent() {
        let products = vec![
            product(1, &["8436097094189"], Some("NE-1")),
            product(2, &["7612345000016", "7612345000023"], None),
        ];
        let first = CatalogIndex::from_products(&products);
        let second = CatalogIndex::from_products(&products);
        assert_eq!(first.product_count(), second.product_count());
        assert_eq!(first.variant_count(), second.variant_count());
        for key in first.variant_keys() {
            assert_eq!(first.lookup(key), second.lookup(key), "key {key} diverged");
        }
    }

    #[tokio::test]
    async fn empty_cache_is_stale_and_has_no_snapshot() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        assert!(cache.is_stale().await);
        assert!(cache.current().await.is_none());
    }
}
