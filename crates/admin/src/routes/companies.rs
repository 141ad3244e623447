//! Company (tenant) route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use brandboard_core::Company;

use crate::db::{CompanyRepository, RepositoryError};
use crate::error::AppError;
use crate::state::AppState;

/// Body for registering a tenant.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyInput {
    pub name: String,
    pub slug: String,
    pub domain: Option<String>,
}

/// List all tenants, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Company>>, AppError> {
    let companies = CompanyRepository::new(state.pool()).list().await?;
    Ok(Json(companies))
}

/// Register a tenant.
#[instrument(skip(state, input), fields(slug = %input.slug))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCompanyInput>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if input.slug.trim().is_empty() {
        return Err(AppError::BadRequest("slug must not be empty".to_string()));
    }

    let company = CompanyRepository::new(state.pool())
        .create(&input.name, &input.slug, input.domain.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// Tenant detail by slug. Bypasses the resolution cache so the dashboard
/// always sees the current record.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(company): Path<String>,
) -> Result<Json<Company>, AppError> {
    let record = state
        .companies()
        .get_by_slug(&company)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("unknown company: {company}"))
            }
            other => other.into(),
        })?;
    Ok(Json(record))
}
