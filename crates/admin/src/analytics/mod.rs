//! Trend aggregation and bucketing engine.
//!
//! Turns the sparse (period, brand, quantity) rows produced by the
//! `brand_order_trends` aggregation function into a dense, gap-filled,
//! chronologically ordered series per brand, plus the color assignment and
//! latest-period snapshot the dashboard charts consume.
//!
//! The whole module is pure and synchronous: it never performs I/O and is
//! recomputed from scratch on every granularity or company change. Fetching
//! the facts is the repository's job ([`crate::db::trends`]).
//!
//! Data flow:
//!
//! ```text
//! aggregation function -> sparse TrendFacts -> period_buckets (gap targets)
//!     -> merge_facts (dense ChartPoints) -> assign_colors -> BrandTrend
//! ```

pub mod buckets;
pub mod palette;
pub mod series;

use chrono::NaiveDate;
use serde::Serialize;

pub use buckets::{Granularity, PeriodBucket, lookback_start, period_buckets};
pub use palette::{BRAND_PALETTE, BrandInfo, assign_colors};
pub use series::{ChartPoint, TrendFact, brand_names, merge_facts};

/// Chart-ready output of the engine for one (company, granularity) fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandTrend {
    /// One dense row per bucket, every brand present in every row.
    pub chart_data: Vec<ChartPoint>,
    /// Brands with their assigned colors, in first-occurrence order.
    pub brands: Vec<BrandInfo>,
}

impl BrandTrend {
    /// Whether the fetch produced no facts at all.
    ///
    /// Distinct from a window where every bucket is zero: that still has
    /// chart rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chart_data.is_empty()
    }
}

/// Build the dense brand trend from fetched facts.
///
/// Pure: same facts, granularity, and reference date always produce the same
/// output. An empty fact list yields an empty trend (no zero-filled buckets).
#[must_use]
pub fn build_brand_trend(
    facts: &[TrendFact],
    granularity: Granularity,
    today: NaiveDate,
) -> BrandTrend {
    let buckets = period_buckets(granularity, today);
    BrandTrend {
        chart_data: merge_facts(&buckets, facts),
        brands: assign_colors(facts),
    }
}

/// One slice of the latest-period pie/summary view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSlice {
    pub name: String,
    pub value: i64,
    pub color: &'static str,
}

/// Project the chronologically latest chart row into (brand, value, color)
/// triples, dropping zero-value brands.
///
/// Used for the compact/tablet presentation. Borrows the series; the shared
/// chart data is never mutated.
#[must_use]
pub fn latest_snapshot(trend: &BrandTrend) -> Vec<SnapshotSlice> {
    let Some(latest) = trend.chart_data.last() else {
        return Vec::new();
    };

    trend
        .brands
        .iter()
        .filter_map(|brand| {
            let value = latest.quantities.get(&brand.name).copied().unwrap_or(0);
            (value != 0).then(|| SnapshotSlice {
                name: brand.name.clone(),
                value,
                color: brand.color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn fact(y: i32, m: u32, d: u32, brand: &str, qty: i64) -> TrendFact {
        TrendFact {
            period_date: date(y, m, d),
            brand_name: brand.to_string(),
            total_quantity: qty,
        }
    }

    #[test]
    fn test_empty_facts_yield_empty_trend() {
        let trend = build_brand_trend(&[], Granularity::Month, date(2024, 3, 31));
        assert!(trend.is_empty());
        assert!(trend.chart_data.is_empty());
        assert!(trend.brands.is_empty());
    }

    #[test]
    fn test_trend_has_bucket_per_period_and_brand_colors() {
        let facts = vec![
            fact(2024, 3, 1, "Acme", 4),
            fact(2024, 2, 1, "Zenith", 2),
        ];
        let trend = build_brand_trend(&facts, Granularity::Month, date(2024, 3, 31));
        assert_eq!(trend.chart_data.len(), 12);
        assert_eq!(trend.brands.len(), 2);
        assert_eq!(trend.brands[0].name, "Acme");
    }

    #[test]
    fn test_snapshot_excludes_zero_value_brands() {
        // In the latest month Acme has no activity, Zenith sold 5.
        let facts = vec![
            fact(2024, 2, 1, "Acme", 9),
            fact(2024, 3, 1, "Zenith", 5),
        ];
        let trend = build_brand_trend(&facts, Granularity::Month, date(2024, 3, 31));

        let snapshot = latest_snapshot(&trend);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Zenith");
        assert_eq!(snapshot[0].value, 5);
        assert_eq!(snapshot[0].color, trend.brands[1].color);
    }

    #[test]
    fn test_snapshot_of_empty_trend_is_empty() {
        let trend = build_brand_trend(&[], Granularity::Day, date(2024, 3, 31));
        assert!(latest_snapshot(&trend).is_empty());
    }

    #[test]
    fn test_snapshot_does_not_mutate_trend() {
        let facts = vec![fact(2024, 3, 1, "Acme", 4)];
        let trend = build_brand_trend(&facts, Granularity::Month, date(2024, 3, 31));
        let before = serde_json::to_string(&trend).expect("serialize");
        let _ = latest_snapshot(&trend);
        let after = serde_json::to_string(&trend).expect("serialize");
        assert_eq!(before, after);
    }
}
