//! Translation of a storefront order into a supplier submission.
//!
//! Translation is all-or-nothing: every line item must resolve to a supplier
//! product id or the whole order fails, with every failing identifier
//! reported at once. Recipient fields are sanitized to the supplier's field
//! limits before submission; the supplier rejects oversized or malformed
//! fields outright.

use chrono::Utc;

use dropbridge_core::order::{ShippingAddress, StorefrontOrder};
use dropbridge_supplier::resolve::Resolver;
use dropbridge_supplier::types::{SupplierOrderLine, SupplierOrderRequest};

use crate::error::SyncError;

const ORDER_NUMBER_MAX: usize = 15;
const NAME_MAX: usize = 50;
const STREET_MAX: usize = 100;
const CITY_MAX: usize = 50;
const POSTAL_MAX: usize = 10;
const PHONE_MAX: usize = 20;
const DEFAULT_PHONE: &str = "000000000";
const CARRIER_NOTES: &str = "storefront order sync";

/// Builds the supplier submission for one storefront order.
///
/// Line items with a non-positive quantity are dropped with a warning. Every
/// remaining line runs the resolution cascade; a guessed resolution is
/// accepted but logged loudly.
///
/// # Errors
///
/// - [`SyncError::Unresolvable`] listing every identifier that failed.
/// - [`SyncError::EmptyOrder`] when no line item survives.
/// - [`SyncError::Supplier`] on network or supplier failures during
///   resolution.
pub async fn translate_order(
    order: &StorefrontOrder,
    resolver: &Resolver<'_>,
    token: &str,
) -> Result<SupplierOrderRequest, SyncError> {
    let order_number = sanitize_order_number(&order.name);

    let mut lines = Vec::new();
    let mut unresolved = Vec::new();
    for item in &order.line_items {
        if item.quantity <= 0 {
            tracing::warn!(
                order_number = %order_number,
                sku = item.sku.as_deref().unwrap_or(""),
                quantity = item.quantity,
                "dropping line item with non-positive quantity"
            );
            continue;
        }
        let raw = item.sku.clone().unwrap_or_default();
        match resolver.resolve(&raw, token).await? {
            Some(resolution) => {
                if resolution.is_guess() {
                    tracing::warn!(
                        order_number = %order_number,
                        sku = %raw,
                        product_id = resolution.product_id(),
                        "line item resolved by guess, not a confirmed catalog match"
                    );
                }
                lines.push(SupplierOrderLine {
                    product_id: resolution.product_id(),
                    units: item.quantity,
                });
            }
            None => unresolved.push(raw),
        }
    }

    if !unresolved.is_empty() {
        return Err(SyncError::Unresolvable {
            order_number,
            identifiers: unresolved,
        });
    }
    if lines.is_empty() {
        return Err(SyncError::EmptyOrder { order_number });
    }

    let address = order.shipping_address.clone().unwrap_or_default();
    Ok(build_request(order_number, lines, &address))
}

fn build_request(
    order_number: String,
    lines: Vec<SupplierOrderLine>,
    address: &ShippingAddress,
) -> SupplierOrderRequest {
    let phone = sanitize_phone(address.phone.as_deref());
    SupplierOrderRequest {
        order_number,
        carrier_notes: CARRIER_NOTES.to_owned(),
        valoration: 0,
        lines,
        name: truncate_chars(address.first_name.as_deref().unwrap_or(""), NAME_MAX),
        second_name: truncate_chars(address.last_name.as_deref().unwrap_or(""), NAME_MAX),
        telephone: phone.clone(),
        mobile: phone,
        street: truncate_chars(address.address1.as_deref().unwrap_or(""), STREET_MAX),
        city: truncate_chars(address.city.as_deref().unwrap_or(""), CITY_MAX),
        county: truncate_chars(address.province.as_deref().unwrap_or(""), CITY_MAX),
        postal_code: truncate_chars(address.zip.as_deref().unwrap_or(""), POSTAL_MAX),
        country: sanitize_country(address.country_code.as_deref()),
    }
}

/// Digits of the display order number (`"#1042"` becomes `"1042"`), capped
/// at the supplier's length limit. An order name with no digits at all gets
/// a unix-timestamp stand-in so the submission still carries a unique,
/// numeric order number.
fn sanitize_order_number(name: &str) -> String {
    let digits: String = name
        .chars()
        .filter(char::is_ascii_digit)
        .take(ORDER_NUMBER_MAX)
        .collect();
    if digits.is_empty() {
        Utc::now().timestamp().to_string()
    } else {
        digits
    }
}

fn sanitize_phone(phone: Option<&str>) -> String {
    match phone.map(str::trim) {
        Some(p) if !p.is_empty() => truncate_chars(p, PHONE_MAX),
        _ => DEFAULT_PHONE.to_owned(),
    }
}

fn sanitize_country(code: Option<&str>) -> String {
    code.unwrap_or("")
        .trim()
        .chars()
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Truncates to at most `max` characters, trimmed. Operates on characters,
/// not bytes, so multi-byte names never split mid-codepoint.
fn truncate_chars(value: &str, max: usize) -> String {
    value.trim().chars().take(max).collect()
}
