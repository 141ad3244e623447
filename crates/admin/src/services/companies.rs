//! Tenant resolution with in-memory caching.
//!
//! Every API request names its tenant by slug in the path. Resolving the
//! slug hits the `companies` table, so lookups are cached via `moka` with a
//! short TTL; renames and deletions converge within one TTL window.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::instrument;

use brandboard_core::{Company, CompanyId};

use crate::config::CompanyCacheConfig;
use crate::db::{CompanyRepository, RepositoryError};

/// Resolves company slugs to ids, caching positive results.
///
/// Only hits are cached. A miss stays uncached so a tenant created moments
/// later is visible immediately.
#[derive(Clone)]
pub struct CompanyService {
    pool: PgPool,
    cache: Cache<String, CompanyId>,
}

impl CompanyService {
    /// Create a new company service.
    #[must_use]
    pub fn new(pool: PgPool, config: &CompanyCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();

        Self { pool, cache }
    }

    /// Resolve a slug to a company id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown slug and
    /// `RepositoryError::Database` if the lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve_slug(&self, slug: &str) -> Result<CompanyId, RepositoryError> {
        if let Some(id) = self.cache.get(slug).await {
            return Ok(id);
        }

        let company = CompanyRepository::new(&self.pool)
            .find_by_slug(slug)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        self.cache.insert(slug.to_string(), company.id).await;
        Ok(company.id)
    }

    /// Fetch the full company record, bypassing the cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Company, RepositoryError> {
        CompanyRepository::new(&self.pool)
            .find_by_slug(slug)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}
