//! Product and product image entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompanyId, Price, ProductId, ProductImageId, ProductStatus};

/// A product in a company's catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub company_id: CompanyId,
    /// Stock keeping unit, unique per company.
    pub sku: String,
    pub name: String,
    /// Brand name used as the grouping key for trend analytics.
    pub brand: String,
    pub description: Option<String>,
    pub price: Price,
    pub status: ProductStatus,
    /// Enriched attribute: dominant color (rule-based or LLM-derived).
    pub color: Option<String>,
    /// Enriched attribute: primary material.
    pub material: Option<String>,
    /// Enriched attribute: product category.
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An image attached to a product.
///
/// `position` controls gallery ordering; the first position is the thumbnail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub product_id: ProductId,
    pub url: String,
    pub alt_text: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}
