//! Product input models.

use rust_decimal::Decimal;
use serde::Deserialize;

use brandboard_core::{CurrencyCode, ProductStatus};

/// Input for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
    /// Major units, e.g. `19.99`.
    pub price: Decimal,
    #[serde(default)]
    pub currency_code: CurrencyCode,
    #[serde(default)]
    pub status: ProductStatus,
    pub color: Option<String>,
    pub material: Option<String>,
    pub category: Option<String>,
}

/// Input for updating a product. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency_code: Option<CurrencyCode>,
    pub status: Option<ProductStatus>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub category: Option<String>,
}

/// Query-string filter for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    /// Case-insensitive match against name, brand, and SKU.
    pub search: Option<String>,
    pub status: Option<ProductStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Input for attaching an image to a product.
#[derive(Debug, Clone, Deserialize)]
pub struct AddImageInput {
    pub url: String,
    pub alt_text: Option<String>,
    /// Appended at the end when omitted.
    pub position: Option<i32>,
}
