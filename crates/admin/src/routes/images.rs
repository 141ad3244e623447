//! Product image route handlers.
//!
//! Images hang off products, so every handler resolves the product through
//! the company-scoped repository first. That lookup is the tenancy check.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use brandboard_core::{CompanyId, ProductId, ProductImage, ProductImageId};

use crate::db::{ProductImageRepository, ProductRepository};
use crate::error::AppError;
use crate::models::product::AddImageInput;
use crate::state::AppState;

use super::resolve_company;

/// Body for gallery reordering: all image ids in their new order.
#[derive(Debug, Deserialize)]
pub struct ReorderInput {
    pub image_ids: Vec<i32>,
}

/// Confirm the product exists in this company before touching its images.
async fn require_product(
    state: &AppState,
    company_id: CompanyId,
    id: i32,
) -> Result<ProductId, AppError> {
    ProductRepository::new(state.pool())
        .get(company_id, ProductId::new(id))
        .await?
        .map(|product| product.id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// List a product's images in gallery order.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<Json<Vec<ProductImage>>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product_id = require_product(&state, company_id, id).await?;
    let images = ProductImageRepository::new(state.pool())
        .list(product_id)
        .await?;
    Ok(Json(images))
}

/// Attach an image to a product.
#[instrument(skip(state, input))]
pub async fn add(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
    Json(input): Json<AddImageInput>,
) -> Result<(StatusCode, Json<ProductImage>), AppError> {
    if input.url.trim().is_empty() {
        return Err(AppError::BadRequest("url must not be empty".to_string()));
    }

    let company_id = resolve_company(&state, &company).await?;
    let product_id = require_product(&state, company_id, id).await?;
    let image = ProductImageRepository::new(state.pool())
        .add(product_id, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Reorder a product's gallery.
#[instrument(skip(state, input))]
pub async fn reorder(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
    Json(input): Json<ReorderInput>,
) -> Result<Json<Vec<ProductImage>>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product_id = require_product(&state, company_id, id).await?;

    let image_ids: Vec<ProductImageId> =
        input.image_ids.into_iter().map(ProductImageId::new).collect();
    let images = ProductImageRepository::new(state.pool())
        .reorder(product_id, &image_ids)
        .await?;
    Ok(Json(images))
}

/// Remove an image from a product.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path((company, id, image_id)): Path<(String, i32, i32)>,
) -> Result<StatusCode, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product_id = require_product(&state, company_id, id).await?;

    let deleted = ProductImageRepository::new(state.pool())
        .delete(product_id, ProductImageId::new(image_id))
        .await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("image {image_id}")))
    }
}
