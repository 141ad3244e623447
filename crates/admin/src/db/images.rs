//! Database operations for product images.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use brandboard_core::{ProductId, ProductImage, ProductImageId};

use super::RepositoryError;
use crate::models::product::AddImageInput;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductImageRow {
    id: i32,
    product_id: i32,
    url: String,
    alt_text: Option<String>,
    position: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductImageRow> for ProductImage {
    fn from(row: ProductImageRow) -> Self {
        Self {
            id: ProductImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            url: row.url,
            alt_text: row.alt_text,
            position: row.position,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product image database operations.
///
/// Callers resolve the product through [`super::ProductRepository`] first,
/// which enforces company scoping; image operations then key on product id.
pub struct ProductImageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductImageRepository<'a> {
    /// Create a new product image repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List images for a product in gallery order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ProductImage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductImageRow>(
            r"
            SELECT id, product_id, url, alt_text, position, created_at
            FROM product_images
            WHERE product_id = $1
            ORDER BY position ASC, id ASC
            ",
        )
        .bind(product_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Attach an image to a product.
    ///
    /// When no position is given the image is appended after the current
    /// last one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(
        &self,
        product_id: ProductId,
        input: &AddImageInput,
    ) -> Result<ProductImage, RepositoryError> {
        let row = sqlx::query_as::<_, ProductImageRow>(
            r"
            INSERT INTO product_images (product_id, url, alt_text, position)
            VALUES (
                $1, $2, $3,
                COALESCE(
                    $4,
                    (SELECT COALESCE(MAX(position) + 1, 0)
                     FROM product_images WHERE product_id = $1)
                )
            )
            RETURNING id, product_id, url, alt_text, position, created_at
            ",
        )
        .bind(product_id.as_i32())
        .bind(&input.url)
        .bind(&input.alt_text)
        .bind(input.position)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete an image.
    ///
    /// # Returns
    ///
    /// Returns `true` if the image was deleted, `false` if it didn't exist
    /// on this product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        product_id: ProductId,
        id: ProductImageId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM product_images
            WHERE product_id = $1 AND id = $2
            ",
        )
        .bind(product_id.as_i32())
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reorder a product's gallery.
    ///
    /// `image_ids` is the full gallery in its new order. Runs in one
    /// transaction so a partial reorder never lands.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any id does not belong to the
    /// product.
    pub async fn reorder(
        &self,
        product_id: ProductId,
        image_ids: &[ProductImageId],
    ) -> Result<Vec<ProductImage>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (position, image_id) in (0i32..).zip(image_ids) {
            let result = sqlx::query(
                r"
                UPDATE product_images
                SET position = $3
                WHERE product_id = $1 AND id = $2
                ",
            )
            .bind(product_id.as_i32())
            .bind(image_id.as_i32())
            .bind(position)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await?;
        self.list(product_id).await
    }
}
