//! Database operations for orders and order items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use brandboard_core::{
    CompanyId, CurrencyCode, Order, OrderId, OrderItem, OrderItemId, OrderStatus, Price,
    ProductId,
};

use super::RepositoryError;
use crate::models::order::{OrderFilter, OrderWithItems};

const DEFAULT_LIMIT: i64 = 50;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    company_id: i32,
    order_number: String,
    customer_email: String,
    status: String,
    total: Decimal,
    currency_code: String,
    placed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let currency_code: CurrencyCode = row
            .currency_code
            .parse()
            .map_err(RepositoryError::DataCorruption)?;
        let status = row
            .status
            .parse::<OrderStatus>()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: OrderId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            order_number: row.order_number,
            customer_email: row.customer_email,
            status,
            total: Price::new(row.total, currency_code),
            placed_at: row.placed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
    currency_code: String,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let currency_code: CurrencyCode = row
            .currency_code
            .parse()
            .map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            unit_price: Price::new(row.unit_price, currency_code),
        })
    }
}

const ORDER_COLUMNS: &str = "id, company_id, order_number, customer_email, status, \
     total, currency_code, placed_at, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders for a company, newest first, with optional status filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status or currency is
    /// invalid.
    pub async fn list(
        &self,
        company_id: CompanyId,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, RepositoryError> {
        let limit = filter.limit.unwrap_or(DEFAULT_LIMIT);
        let offset = filter.offset.unwrap_or(0);
        let status = filter.status.map(|s| s.to_string());

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE company_id = $1
                AND ($2::text IS NULL OR status = $2)
            ORDER BY placed_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "
        ))
        .bind(company_id.as_i32())
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order with its line items, scoped to the company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_items(
        &self,
        company_id: CompanyId,
        id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE company_id = $1 AND id = $2
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order: Order = row.try_into()?;

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, quantity, unit_price, currency_code
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<OrderItem>, _>>()?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Update an order's status.
    ///
    /// Moving an order to `cancelled` removes it from trend aggregation on
    /// the next query; no recomputation step is needed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist in
    /// this company's scope.
    pub async fn update_status(
        &self,
        company_id: CompanyId,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            UPDATE orders
            SET status = $3, updated_at = now()
            WHERE company_id = $1 AND id = $2
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(company_id.as_i32())
        .bind(id.as_i32())
        .bind(status.to_string())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
