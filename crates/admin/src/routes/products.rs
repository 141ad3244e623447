//! Product CRUD route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use brandboard_core::{Product, ProductId};

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::product::{CreateProductInput, ProductFilter, UpdateProductInput};
use crate::state::AppState;

use super::resolve_company;

/// List products for a company.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let products = ProductRepository::new(state.pool())
        .list(company_id, &filter)
        .await?;
    Ok(Json(products))
}

/// Get a single product.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<Json<Product>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product = ProductRepository::new(state.pool())
        .get(company_id, ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Create a product.
#[instrument(skip(state, input), fields(sku = %input.sku))]
pub async fn create(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    if input.sku.trim().is_empty() {
        return Err(AppError::BadRequest("sku must not be empty".to_string()));
    }
    if input.brand.trim().is_empty() {
        return Err(AppError::BadRequest("brand must not be empty".to_string()));
    }

    let company_id = resolve_company(&state, &company).await?;
    let product = ProductRepository::new(state.pool())
        .create(company_id, &input)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product.
#[instrument(skip(state, input))]
pub async fn update(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product = ProductRepository::new(state.pool())
        .update(company_id, ProductId::new(id), &input)
        .await?;
    Ok(Json(product))
}

/// Archive a product (soft delete).
#[instrument(skip(state))]
pub async fn archive(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<Json<Product>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let product = ProductRepository::new(state.pool())
        .archive(company_id, ProductId::new(id))
        .await?;
    Ok(Json(product))
}
