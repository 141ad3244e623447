//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                        - Liveness check
//! GET  /health/ready                                  - Readiness check (hits the database)
//!
//! # Companies
//! GET    /api/companies                               - Tenant listing
//! POST   /api/companies                               - Register tenant
//! GET    /api/{company}                               - Tenant detail by slug
//!
//! # Products
//! GET    /api/{company}/products                      - Product listing (search, status, paging)
//! POST   /api/{company}/products                      - Create product
//! GET    /api/{company}/products/{id}                 - Product detail
//! PATCH  /api/{company}/products/{id}                 - Partial update
//! DELETE /api/{company}/products/{id}                 - Archive (soft delete)
//! POST   /api/{company}/products/{id}/enrich          - Derive color/material/category
//!
//! # Product Images
//! GET    /api/{company}/products/{id}/images          - Gallery in display order
//! POST   /api/{company}/products/{id}/images          - Attach image
//! PUT    /api/{company}/products/{id}/images/reorder  - Reorder gallery
//! DELETE /api/{company}/products/{id}/images/{image_id} - Remove image
//!
//! # Orders
//! GET   /api/{company}/orders                         - Order listing (status filter, paging)
//! GET   /api/{company}/orders/{id}                    - Order with line items
//! PATCH /api/{company}/orders/{id}/status             - Status transition
//!
//! # Analytics
//! GET /api/{company}/analytics/brand-trends           - Dense per-brand trend series
//! ```
//!
//! `{company}` is the tenant's URL slug. Every handler resolves it first;
//! an unknown slug is a 404 before any table is touched.

pub mod companies;
pub mod enrichment;
pub mod images;
pub mod orders;
pub mod products;
pub mod trends;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use brandboard_core::CompanyId;

use crate::error::AppError;
use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Companies
        .route(
            "/api/companies",
            get(companies::list).post(companies::create),
        )
        .route("/api/{company}", get(companies::get))
        // Products
        .route(
            "/api/{company}/products",
            get(products::list).post(products::create),
        )
        .route(
            "/api/{company}/products/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::archive),
        )
        .route(
            "/api/{company}/products/{id}/enrich",
            post(enrichment::enrich),
        )
        // Product images
        .route(
            "/api/{company}/products/{id}/images",
            get(images::list).post(images::add),
        )
        .route(
            "/api/{company}/products/{id}/images/reorder",
            put(images::reorder),
        )
        .route(
            "/api/{company}/products/{id}/images/{image_id}",
            delete(images::remove),
        )
        // Orders
        .route("/api/{company}/orders", get(orders::list))
        .route("/api/{company}/orders/{id}", get(orders::get))
        .route(
            "/api/{company}/orders/{id}/status",
            patch(orders::update_status),
        )
        // Analytics
        .route(
            "/api/{company}/analytics/brand-trends",
            get(trends::brand_trends),
        )
}

/// Resolve a company slug or fail with a named 404.
pub(crate) async fn resolve_company(
    state: &AppState,
    slug: &str,
) -> Result<CompanyId, AppError> {
    state
        .companies()
        .resolve_slug(slug)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("unknown company: {slug}"))
            }
            other => other.into(),
        })
}
