//! Database operations for the brand trend aggregation.
//!
//! All heavy lifting happens in the `brand_order_trends` SQL function
//! installed by migrations: it joins order items to products, excludes
//! cancelled orders, truncates `placed_at` to the requested granularity,
//! and sums quantities per (period, brand). The rows that come back are
//! sparse; the analytics module densifies them against the bucket grid.

use chrono::NaiveDate;
use sqlx::PgPool;

use brandboard_core::CompanyId;

use super::{RepositoryError, map_aggregation_error};
use crate::analytics::{Granularity, TrendFact};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct TrendFactRow {
    period_date: NaiveDate,
    brand_name: String,
    total_quantity: i64,
}

impl From<TrendFactRow> for TrendFact {
    fn from(row: TrendFactRow) -> Self {
        Self {
            period_date: row.period_date,
            brand_name: row.brand_name,
            total_quantity: row.total_quantity,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for trend aggregation queries.
pub struct TrendRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrendRepository<'a> {
    /// Create a new trend repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch sparse per-brand quantities for periods at or after `since`.
    ///
    /// An empty result is a normal outcome (new tenant, no orders in the
    /// window) and is NOT an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::AggregationMissing` when the aggregation
    /// function or its tables have not been migrated, and
    /// `RepositoryError::Database` for any other failure.
    pub async fn brand_order_trends(
        &self,
        company_id: CompanyId,
        granularity: Granularity,
        since: NaiveDate,
    ) -> Result<Vec<TrendFact>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrendFactRow>(
            r"
            SELECT period_date, brand_name, total_quantity
            FROM brand_order_trends($1, $2, $3)
            ORDER BY period_date ASC, brand_name ASC
            ",
        )
        .bind(company_id.as_i32())
        .bind(granularity.as_str())
        .bind(since)
        .fetch_all(self.pool)
        .await
        .map_err(map_aggregation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
