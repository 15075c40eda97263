//! Wire shapes of the storefront Admin API, limited to what the bridge
//! reads and writes.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<StorefrontProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontProduct {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub variants: Vec<StorefrontVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontVariant {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    pub inventory_item_id: i64,
    #[serde(default)]
    pub inventory_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}
