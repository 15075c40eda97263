use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested against a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let supplier_user = require("DROPBRIDGE_SUPPLIER_USER")?;
    let supplier_password = require("DROPBRIDGE_SUPPLIER_PASSWORD")?;
    let storefront_domain = require("DROPBRIDGE_STOREFRONT_DOMAIN")?;
    let storefront_access_token = require("DROPBRIDGE_STOREFRONT_ACCESS_TOKEN")?;

    let bind_addr = parse_addr("DROPBRIDGE_BIND_ADDR", "0.0.0.0:8080")?;
    let log_level = or_default("DROPBRIDGE_LOG_LEVEL", "info");
    let supplier_base_url = or_default(
        "DROPBRIDGE_SUPPLIER_BASE_URL",
        "https://drop.novaengel.com/api",
    );
    let supplier_lang = or_default("DROPBRIDGE_SUPPLIER_LANG", "en");

    let request_timeout_secs = parse_u64("DROPBRIDGE_REQUEST_TIMEOUT_SECS", "30")?;
    let pacing_delay_ms = parse_u64("DROPBRIDGE_PACING_DELAY_MS", "250")?;
    let max_attempts = parse_u32("DROPBRIDGE_MAX_ATTEMPTS", "8")?;
    let backoff_base_secs = parse_u64("DROPBRIDGE_BACKOFF_BASE_SECS", "1")?;
    let rate_limit_fallback_secs = parse_u64("DROPBRIDGE_RATE_LIMIT_FALLBACK_SECS", "8")?;

    let catalog_ttl_secs = parse_u64("DROPBRIDGE_CATALOG_TTL_SECS", "900")?;
    let catalog_page_size = parse_u32("DROPBRIDGE_CATALOG_PAGE_SIZE", "200")?;
    let resolver_scan_pages = parse_u32("DROPBRIDGE_RESOLVER_SCAN_PAGES", "3")?;
    let reconcile_interval_secs = parse_u64("DROPBRIDGE_RECONCILE_INTERVAL_SECS", "900")?;

    Ok(AppConfig {
        bind_addr,
        log_level,
        supplier_base_url,
        supplier_user,
        supplier_password,
        supplier_lang,
        storefront_domain,
        storefront_access_token,
        request_timeout_secs,
        pacing_delay_ms,
        max_attempts,
        backoff_base_secs,
        rate_limit_fallback_secs,
        catalog_ttl_secs,
        catalog_page_size,
        resolver_scan_pages,
        reconcile_interval_secs,
    })
}
