//! Periodic stock reconciliation: supplier stock levels pushed onto
//! storefront variants.
//!
//! All reads happen before any write. A fetch failure therefore aborts the
//! whole run with no storefront mutation; the next scheduled run starts
//! clean. Writes are idempotent absolute sets, only issued for variants
//! whose storefront quantity differs from the supplier's.

use std::collections::HashMap;

use dropbridge_storefront::StorefrontClient;
use dropbridge_supplier::catalog::CatalogCache;
use dropbridge_supplier::client::SupplierClient;
use dropbridge_supplier::normalize::{candidate_forms, clean_identifier};

use crate::error::SyncError;

const LISTING_PAGE_SIZE: u32 = 250;

/// Runs one reconciliation pass. Returns the number of variants updated.
///
/// Variants whose SKU does not resolve against the catalog, and resolved
/// products absent from the stock snapshot, are skipped with a debug log;
/// the supplier and storefront catalogs legitimately diverge.
///
/// # Errors
///
/// Any supplier or storefront failure during the read phase aborts the run.
/// A failed inventory write aborts mid-run; already-applied sets are
/// absolute values and remain correct.
pub async fn reconcile(
    supplier: &SupplierClient,
    storefront: &StorefrontClient,
    cache: &CatalogCache,
) -> Result<u64, SyncError> {
    let token = supplier.login().await?;
    let index = cache.ensure_fresh(supplier, &token).await?;
    let stock: HashMap<i64, i64> = supplier
        .fetch_stock(&token)
        .await?
        .into_iter()
        .map(|level| (level.id, level.stock))
        .collect();
    let products = storefront.fetch_all_products(LISTING_PAGE_SIZE).await?;
    let location_id = storefront.default_location().await?;

    let mut examined = 0u64;
    let mut updated = 0u64;
    for product in &products {
        for variant in &product.variants {
            examined += 1;
            let clean = clean_identifier(variant.sku.as_deref().unwrap_or(""));
            if clean.is_empty() {
                continue;
            }
            let Some(product_id) = index.lookup_any(&candidate_forms(&clean)) else {
                tracing::debug!(sku = %clean, "variant SKU not in supplier catalog, skipping");
                continue;
            };
            let Some(&available) = stock.get(&product_id) else {
                tracing::debug!(
                    sku = %clean,
                    product_id,
                    "product missing from stock snapshot, skipping"
                );
                continue;
            };
            if variant.inventory_quantity == available {
                continue;
            }
            storefront
                .set_inventory_level(variant.inventory_item_id, location_id, available)
                .await?;
            tracing::info!(
                sku = %clean,
                product_id,
                from = variant.inventory_quantity,
                to = available,
                "storefront inventory updated"
            );
            updated += 1;
        }
    }

    tracing::info!(examined, updated, "stock reconciliation pass complete");
    Ok(updated)
}
