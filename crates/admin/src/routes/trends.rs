//! Brand trend analytics route handler.
//!
//! The response distinguishes three terminal outcomes:
//!
//! - `status: "ok"` - dense chart data, brand colors, latest snapshot
//! - `status: "no_data"` - the query ran and found nothing in the window
//! - an error status - the database failed (500) or the aggregation
//!   function is missing because migrations have not run (503)
//!
//! "No orders yet" and "the backend is broken" are never conflated.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analytics::{
    BrandInfo, ChartPoint, Granularity, SnapshotSlice, build_brand_trend, latest_snapshot,
    lookback_start,
};
use crate::db::TrendRepository;
use crate::error::AppError;
use crate::state::AppState;

use super::resolve_company;

/// Query parameters for the trend endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    /// Bucket width; defaults to `month`.
    #[serde(default)]
    pub granularity: Granularity,
}

/// Trend endpoint response body.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BrandTrendResponse {
    /// Dense series covering the full lookback window.
    Ok {
        granularity: Granularity,
        chart_data: Vec<ChartPoint>,
        brands: Vec<BrandInfo>,
        latest: Vec<SnapshotSlice>,
    },
    /// The aggregation ran and produced no rows for this window.
    NoData { message: String },
}

/// Dense per-brand trend series for a company.
#[instrument(skip(state))]
pub async fn brand_trends(
    State(state): State<AppState>,
    Path(company): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<BrandTrendResponse>, AppError> {
    let company_id = resolve_company(&state, &company).await?;
    let granularity = query.granularity;
    let today = Utc::now().date_naive();

    let facts = TrendRepository::new(state.pool())
        .brand_order_trends(company_id, granularity, lookback_start(granularity, today))
        .await?;

    if facts.is_empty() {
        return Ok(Json(BrandTrendResponse::NoData {
            message: format!("no orders in the {granularity} window"),
        }));
    }

    let trend = build_brand_trend(&facts, granularity, today);
    let latest = latest_snapshot(&trend);

    Ok(Json(BrandTrendResponse::Ok {
        granularity,
        chart_data: trend.chart_data,
        brands: trend.brands,
        latest,
    }))
}
