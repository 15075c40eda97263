//! Wire shapes of the supplier API.
//!
//! Field names follow the supplier's JSON exactly; everything the catalog
//! endpoint may omit per product defaults rather than failing the whole page.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product row from the paginated catalog endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplierProduct {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "EANS", default)]
    pub eans: Vec<String>,
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "FullCode", default)]
    pub full_code: Option<String>,
    #[serde(rename = "Stock", default)]
    pub stock: i64,
    #[serde(rename = "Price", default)]
    pub price: Option<Decimal>,
}

impl SupplierProduct {
    /// Every identifier the catalog knows this product by, including the
    /// supplier's own numeric id — storefront SKUs are sometimes that id
    /// verbatim.
    #[must_use]
    pub fn raw_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.eans.clone();
        ids.extend(self.sku.clone());
        ids.extend(self.full_code.clone());
        ids.push(self.id.to_string());
        ids
    }
}

/// One row of the supplier's stock snapshot endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StockLevel {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Stock", default)]
    pub stock: i64,
}

/// An order as the supplier's submission endpoint expects it.
///
/// All recipient fields are pre-sanitized by the order translator: the
/// supplier rejects malformed or empty required fields outright.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderRequest {
    /// Digits only, at most 15 characters.
    pub order_number: String,
    pub carrier_notes: String,
    pub valoration: i32,
    pub lines: Vec<SupplierOrderLine>,
    pub name: String,
    pub second_name: String,
    pub telephone: String,
    pub mobile: String,
    pub street: String,
    pub city: String,
    pub county: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderLine {
    pub product_id: i64,
    pub units: i64,
}

/// Per-order entry of the submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResult {
    #[serde(rename = "BookingCode", default)]
    pub booking_code: Option<String>,
    #[serde(rename = "Errors", default)]
    pub errors: Option<serde_json::Value>,
}

impl OrderResult {
    /// Whether the supplier reported line-level errors for this order.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        match &self.errors {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Array(items)) => !items.is_empty(),
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}
