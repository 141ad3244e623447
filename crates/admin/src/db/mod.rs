//! Database operations for the Brandboard `PostgreSQL` instance.
//!
//! # Tables
//!
//! - `companies` - Tenant registry; every other table carries `company_id`
//! - `products` / `product_images` - Catalog with enrichable attributes
//! - `orders` / `order_items` - Order facts the trend engine aggregates
//!
//! # Aggregation
//!
//! `brand_order_trends` is a SQL function installed by migrations. The
//! trends repository maps "function does not exist" onto
//! [`RepositoryError::AggregationMissing`] so callers can distinguish a
//! half-migrated database from an empty one.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p brandboard-cli -- migrate
//! ```

pub mod companies;
pub mod images;
pub mod orders;
pub mod products;
pub mod trends;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use companies::CompanyRepository;
pub use images::ProductImageRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use trends::TrendRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique SKU per company).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The aggregation function or a table it reads is missing.
    ///
    /// Raised when `PostgreSQL` reports `undefined_table` (42P01) or
    /// `undefined_function` (42883), which means migrations have not been
    /// applied. Distinct from an empty result set.
    #[error("aggregation unavailable: {0}")]
    AggregationMissing(String),
}

/// `PostgreSQL` codes for missing relations and functions.
const UNDEFINED_TABLE: &str = "42P01";
const UNDEFINED_FUNCTION: &str = "42883";

/// Map a sqlx error onto [`RepositoryError::AggregationMissing`] when it
/// indicates absent schema, passing everything else through.
fn map_aggregation_error(error: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = error
        && let Some(code) = db_err.code()
        && (code == UNDEFINED_TABLE || code == UNDEFINED_FUNCTION)
    {
        return RepositoryError::AggregationMissing(db_err.message().to_string());
    }
    RepositoryError::Database(error)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
