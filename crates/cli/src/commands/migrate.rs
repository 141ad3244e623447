//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migrations live in `crates/admin/migrations/` and are embedded into the
//! binary at compile time. The server never runs them itself; a half-migrated
//! database surfaces as a 503 on the trend endpoint until this command runs.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

/// Errors from the migrate command.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    info!("Running migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
