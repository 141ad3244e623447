//! Database operations for the product catalog.
//!
//! Every query is scoped by `company_id`. An UPDATE that matches zero rows
//! for an existing product id means another tenant owns it (or a row policy
//! filtered the write); that case is surfaced as a conflict rather than
//! silently reported as success.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::warn;

use brandboard_core::{CompanyId, Price, Product, ProductId, ProductStatus};

use super::RepositoryError;
use crate::enrichment::ProductEnrichment;
use crate::models::product::{CreateProductInput, ProductFilter, UpdateProductInput};

const DEFAULT_LIMIT: i64 = 50;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    company_id: i32,
    sku: String,
    name: String,
    brand: String,
    description: Option<String>,
    price: Decimal,
    currency_code: String,
    status: String,
    color: Option<String>,
    material: Option<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let currency_code = row
            .currency_code
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let status = row
            .status
            .parse::<ProductStatus>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: ProductId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            sku: row.sku,
            name: row.name,
            brand: row.brand,
            description: row.description,
            price: Price::new(row.price, currency_code),
            status,
            color: row.color,
            material: row.material,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, company_id, sku, name, brand, description, \
     price, currency_code, status, color, material, category, \
     created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products for a company with optional search and status filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status or currency is
    /// invalid.
    pub async fn list(
        &self,
        company_id: CompanyId,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, RepositoryError> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = filter.offset.unwrap_or(0);
        let pattern = filter.search.as_ref().map(|s| format!("%{s}%"));
        let status = filter.status.map(|s| s.to_string());

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE company_id = $1
                AND ($2::text IS NULL OR name ILIKE $2 OR brand ILIKE $2 OR sku ILIKE $2)
                AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "
        ))
        .bind(company_id.as_i32())
        .bind(pattern)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a product by ID, scoped to the company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        company_id: CompanyId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE company_id = $1 AND id = $2
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU already exists for
    /// this company. Returns `RepositoryError::Database` for other database
    /// errors.
    pub async fn create(
        &self,
        company_id: CompanyId,
        input: &CreateProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO products (
                company_id, sku, name, brand, description,
                price, currency_code, status, color, material, category
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(company_id.as_i32())
        .bind(&input.sku)
        .bind(&input.name)
        .bind(&input.brand)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.currency_code.code())
        .bind(input.status.to_string())
        .bind(&input.color)
        .bind(&input.material)
        .bind(&input.category)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("products_company_id_sku_key")
            {
                return RepositoryError::Conflict(format!("SKU already exists: {}", input.sku));
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Update a product. `None` fields are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist at
    /// all, and `RepositoryError::Conflict` if it exists but the write was
    /// filtered out of this company's scope.
    pub async fn update(
        &self,
        company_id: CompanyId,
        id: ProductId,
        input: &UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products
            SET
                name = COALESCE($3, name),
                brand = COALESCE($4, brand),
                description = COALESCE($5, description),
                price = COALESCE($6, price),
                currency_code = COALESCE($7, currency_code),
                status = COALESCE($8, status),
                color = COALESCE($9, color),
                material = COALESCE($10, material),
                category = COALESCE($11, category),
                updated_at = now()
            WHERE company_id = $1 AND id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .bind(&input.name)
        .bind(&input.brand)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.currency_code.map(|c| c.code()))
        .bind(input.status.map(|s| s.to_string()))
        .bind(&input.color)
        .bind(&input.material)
        .bind(&input.category)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.classify_missing_write(company_id, id).await?),
        }
    }

    /// Soft-delete a product by archiving it.
    ///
    /// Archived products keep their order history and past trend
    /// contributions; listings exclude them via the status filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn archive(
        &self,
        company_id: CompanyId,
        id: ProductId,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products
            SET status = 'archived', updated_at = now()
            WHERE company_id = $1 AND id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.classify_missing_write(company_id, id).await?),
        }
    }

    /// Store derived attributes on a product, leaving absent ones unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn apply_enrichment(
        &self,
        company_id: CompanyId,
        id: ProductId,
        enrichment: &ProductEnrichment,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products
            SET
                color = COALESCE($3, color),
                material = COALESCE($4, material),
                category = COALESCE($5, category),
                updated_at = now()
            WHERE company_id = $1 AND id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .bind(&enrichment.color)
        .bind(&enrichment.material)
        .bind(&enrichment.category)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => Err(self.classify_missing_write(company_id, id).await?),
        }
    }

    /// Distinguish "no such product" from "product exists outside this
    /// company's scope" after a zero-row write.
    async fn classify_missing_write(
        &self,
        company_id: CompanyId,
        id: ProductId,
    ) -> Result<RepositoryError, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id.as_i32())
                .fetch_one(self.pool)
                .await?;

        Ok(classify_scoped_write(company_id, id, exists))
    }
}

/// Classify a write that matched zero rows, given whether the row exists
/// without the company filter.
///
/// An existing row means the write was filtered out of the caller's tenant
/// scope; that case is logged and reported as a conflict, never papered
/// over: a write that silently hits zero rows would let callers believe an
/// update landed.
fn classify_scoped_write(
    company_id: CompanyId,
    id: ProductId,
    row_exists: bool,
) -> RepositoryError {
    if row_exists {
        warn!(
            product_id = id.as_i32(),
            company_id = company_id.as_i32(),
            "write matched zero rows for an existing product; \
             row-level security may be filtering writes"
        );
        RepositoryError::Conflict(
            "product exists but is outside this company's scope".to_string(),
        )
    } else {
        RepositoryError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_row_write_on_existing_row_is_a_conflict() {
        let error = classify_scoped_write(CompanyId::new(1), ProductId::new(7), true);
        assert!(matches!(error, RepositoryError::Conflict(_)));
        assert!(error.to_string().contains("outside this company's scope"));
    }

    #[test]
    fn test_zero_row_write_on_absent_row_is_not_found() {
        let error = classify_scoped_write(CompanyId::new(1), ProductId::new(7), false);
        assert!(matches!(error, RepositoryError::NotFound));
    }
}
