//! End-to-end submission of one storefront order to the supplier.

use dropbridge_core::order::StorefrontOrder;
use dropbridge_supplier::catalog::CatalogCache;
use dropbridge_supplier::client::SupplierClient;
use dropbridge_supplier::resolve::Resolver;
use dropbridge_supplier::types::OrderResult;

use crate::error::SyncError;
use crate::translate::translate_order;

/// Logs in, translates, and submits one order.
///
/// A fresh session token is obtained per submission; the supplier may
/// invalidate tokens without notice.
///
/// # Errors
///
/// Any step failing aborts the submission: [`SyncError::Unresolvable`] or
/// [`SyncError::EmptyOrder`] from translation, [`SyncError::Supplier`] for
/// login, resolution, or a supplier rejection.
pub async fn submit_order(
    supplier: &SupplierClient,
    cache: &CatalogCache,
    scan_pages: u32,
    order: &StorefrontOrder,
) -> Result<OrderResult, SyncError> {
    tracing::info!(
        order = %order.name,
        line_items = order.line_items.len(),
        "submitting storefront order to supplier"
    );

    let token = supplier.login().await?;
    let resolver = Resolver::new(supplier, cache, scan_pages);
    let request = translate_order(order, &resolver, &token).await?;
    let result = supplier.send_order(&token, &request).await?;

    tracing::info!(
        order = %order.name,
        order_number = %request.order_number,
        lines = request.lines.len(),
        "order submitted"
    );
    Ok(result)
}
