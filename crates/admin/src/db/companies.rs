//! Database operations for the tenant registry.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use brandboard_core::{Company, CompanyId};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i32,
    name: String,
    slug: String,
    domain: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: CompanyId::new(row.id),
            name: row.name,
            slug: row.slug,
            domain: row.domain,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for company (tenant) database operations.
pub struct CompanyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepository<'a> {
    /// Create a new company repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a company by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Company>, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r"
            SELECT id, name, slug, domain, created_at
            FROM companies
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List all companies, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Company>, RepositoryError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r"
            SELECT id, name, slug, domain, created_at
            FROM companies
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        domain: Option<&str>,
    ) -> Result<Company, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r"
            INSERT INTO companies (name, slug, domain)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, domain, created_at
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(domain)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("companies_slug_key")
            {
                return RepositoryError::Conflict(format!("slug already taken: {slug}"));
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }
}
