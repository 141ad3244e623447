//! Order route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use brandboard_core::{Order, OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::models::order::{OrderFilter, OrderWithItems};
use crate::state::AppState;

use super::resolve_company;

/// Body for status transitions.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: OrderStatus,
}

/// List orders for a company, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<Order>>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let orders = OrderRepository::new(state.pool())
        .list(company_id, &filter)
        .await?;
    Ok(Json(orders))
}

/// Get an order with its line items.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
) -> Result<Json<OrderWithItems>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let order = OrderRepository::new(state.pool())
        .get_with_items(company_id, OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// Transition an order's status.
///
/// Cancelling drops the order from trend aggregation on the next query.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path((company, id)): Path<(String, i32)>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<Order>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let order = OrderRepository::new(state.pool())
        .update_status(company_id, OrderId::new(id), input.status)
        .await?;
    Ok(Json(order))
}
