//! Inbound order-created webhook payload shapes.
//!
//! These mirror the storefront's webhook JSON as delivered, not an internal
//! ideal: `name` carries the human order number (`"#1042"`), line items carry
//! the raw SKU string whose format is unreliable (EAN, quoted EAN, short
//! code, or a supplier id reused as SKU), and every field the storefront may
//! omit is optional. Orders are transient — deserialized once per delivery,
//! never stored.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontOrder {
    /// Display order number, e.g. `"#1042"`.
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub line_items: Vec<OrderLineItem>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineItem {
    /// Raw storefront identifier for the product; format varies by
    /// integration revision and is resolved through the identity cascade.
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}
