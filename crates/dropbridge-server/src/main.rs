mod api;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use dropbridge_http::{HttpClientConfig, ResilientClient};
use dropbridge_storefront::StorefrontClient;
use dropbridge_supplier::catalog::CatalogCache;
use dropbridge_supplier::client::SupplierClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dropbridge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::info!(?config, "starting dropbridge");

    let http_config = HttpClientConfig {
        timeout_secs: config.request_timeout_secs,
        pacing_delay_ms: config.pacing_delay_ms,
        max_attempts: config.max_attempts,
        backoff_base_secs: config.backoff_base_secs,
        rate_limit_fallback_secs: config.rate_limit_fallback_secs,
        ..HttpClientConfig::default()
    };

    let supplier = Arc::new(SupplierClient::new(
        ResilientClient::new(&http_config)?,
        &config.supplier_base_url,
        &config.supplier_user,
        &config.supplier_password,
        &config.supplier_lang,
        config.catalog_page_size,
    ));
    let storefront = Arc::new(StorefrontClient::new(
        ResilientClient::new(&http_config)?,
        &config.storefront_domain,
        &config.storefront_access_token,
    ));
    let cache = Arc::new(CatalogCache::new(Duration::from_secs(config.catalog_ttl_secs)));

    let _scheduler = scheduler::build_scheduler(
        Arc::clone(&supplier),
        Arc::clone(&storefront),
        Arc::clone(&cache),
        config.reconcile_interval_secs,
    )
    .await?;

    let app = build_app(AppState {
        supplier,
        cache,
        scan_pages: config.resolver_scan_pages,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
