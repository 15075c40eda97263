//! HTTP surface of the bridge: a health probe and the order-created webhook.
//!
//! The webhook acknowledges immediately and does the translation/submission
//! work in a background task; the storefront redelivers webhooks that are
//! slow to acknowledge, and a redelivered order would be submitted twice.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use dropbridge_core::order::StorefrontOrder;
use dropbridge_supplier::catalog::CatalogCache;
use dropbridge_supplier::client::SupplierClient;
use dropbridge_sync::{submit_order, SyncError};

#[derive(Clone)]
pub struct AppState {
    pub supplier: Arc<SupplierClient>,
    pub cache: Arc<CatalogCache>,
    pub scan_pages: u32,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/webhooks/orders/create", post(order_created))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Accepts an order-created webhook and submits the order in the background.
///
/// Always acknowledges with 202 once the payload parses; submission failures
/// are an operator concern, not the storefront's, and are logged loudly.
async fn order_created(
    State(state): State<AppState>,
    Json(order): Json<StorefrontOrder>,
) -> StatusCode {
    tracing::info!(order = %order.name, "order-created webhook received");
    tokio::spawn(async move {
        match submit_order(&state.supplier, &state.cache, state.scan_pages, &order).await {
            Ok(result) => tracing::info!(
                order = %order.name,
                booking_code = result.booking_code.as_deref().unwrap_or(""),
                "order submission succeeded"
            ),
            Err(err @ SyncError::Unresolvable { .. }) => tracing::error!(
                order = %order.name,
                error = %err,
                "ORDER NOT SUBMITTED: manual intervention required"
            ),
            Err(err) => tracing::error!(
                order = %order.name,
                error = %err,
                "order submission failed"
            ),
        }
    });
    StatusCode::ACCEPTED
}
