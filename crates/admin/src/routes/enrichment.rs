//! Product enrichment route handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use brandboard_core::{Product, ProductId};

use crate::db::ProductRepository;
use crate::enrichment::{EnrichmentInput, EnrichmentOutcome};
use crate::error::AppError;
use crate::state::AppState;

use super::resolve_company;

/// Response for an enrichment run: the updated product plus which strategy
/// actually produced the attributes.
#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub product: Product,
    #[serde(flatten)]
    pub outcome: EnrichmentOutcome,
}

/// Derive and store color/material/category for a product.
///
/// Always returns 200 on a reachable product: an LLM failure degrades to
/// the rule-based strategy and is reported in the `source` field.
#[instrument(skip(state))]
pub async fn enrich(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<Json<EnrichResponse>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let repo = ProductRepository::new(state.pool());

    let product = repo
        .get(company_id, ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let input = EnrichmentInput {
        name: product.name.clone(),
        brand: product.brand.clone(),
        description: product.description.clone(),
    };
    let outcome = state.enricher().enrich(&input).await;

    let product = repo
        .apply_enrichment(company_id, product.id, &outcome.enrichment)
        .await?;

    Ok(Json(EnrichResponse { product, outcome }))
}
