use std::net::SocketAddr;

/// Runtime configuration for the bridge, sourced from `DROPBRIDGE_*`
/// environment variables by [`crate::load_app_config`].
///
/// Credentials for both platforms live here; `Debug` redacts them so the
/// config can be logged at startup without leaking secrets.
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,

    pub supplier_base_url: String,
    pub supplier_user: String,
    pub supplier_password: String,
    /// Catalog description language segment of the paging endpoint.
    pub supplier_lang: String,

    /// Storefront Admin API domain, e.g. `my-shop.myshopify.com`.
    pub storefront_domain: String,
    pub storefront_access_token: String,

    pub request_timeout_secs: u64,
    /// Fixed delay inserted before every outbound request.
    pub pacing_delay_ms: u64,
    /// Total attempt budget for transient network failures.
    pub max_attempts: u32,
    pub backoff_base_secs: u64,
    /// Wait applied to a 429 response whose `Retry-After` hint is absent
    /// or unparsable.
    pub rate_limit_fallback_secs: u64,

    pub catalog_ttl_secs: u64,
    pub catalog_page_size: u32,
    /// Pages scanned directly against the supplier when the catalog cache
    /// misses an identifier.
    pub resolver_scan_pages: u32,
    pub reconcile_interval_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("supplier_base_url", &self.supplier_base_url)
            .field("supplier_user", &self.supplier_user)
            .field("supplier_password", &"[redacted]")
            .field("supplier_lang", &self.supplier_lang)
            .field("storefront_domain", &self.storefront_domain)
            .field("storefront_access_token", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("pacing_delay_ms", &self.pacing_delay_ms)
            .field("max_attempts", &self.max_attempts)
            .field("backoff_base_secs", &self.backoff_base_secs)
            .field("rate_limit_fallback_secs", &self.rate_limit_fallback_secs)
            .field("catalog_ttl_secs", &self.catalog_ttl_secs)
            .field("catalog_page_size", &self.catalog_page_size)
            .field("resolver_scan_pages", &self.resolver_scan_pages)
            .field("reconcile_interval_secs", &self.reconcile_interval_secs)
            .finish()
    }
}
