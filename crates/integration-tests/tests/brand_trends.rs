//! End-to-end tests of the trend engine: sparse facts in, chart-ready JSON
//! out. These run the same path the trend endpoint runs after its database
//! fetch, against a realistic multi-brand fact set.

use chrono::NaiveDate;
use serde_json::Value;

use brandboard_admin::analytics::{
    BRAND_PALETTE, Granularity, TrendFact, build_brand_trend, latest_snapshot, lookback_start,
    period_buckets,
};

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

/// A quarter of monthly sales for three brands, with gaps.
fn monthly_facts() -> Vec<TrendFact> {
    vec![
        fact(2024, 1, 1, "Northpeak", 12),
        fact(2024, 2, 1, "Northpeak", 8),
        fact(2024, 3, 1, "Northpeak", 15),
        fact(2024, 1, 1, "Harbor & Co", 3),
        // Harbor & Co has no February sales.
        fact(2024, 3, 1, "Harbor & Co", 6),
        // Loomworks only shows up in March.
        fact(2024, 3, 1, "Loomworks", 9),
    ]
}

// =============================================================================
// Window Shape
// =============================================================================

#[test]
fn test_window_sizes_per_granularity() {
    let today = date(2024, 3, 31);
    assert_eq!(period_buckets(Granularity::Day, today).len(), 31);
    assert_eq!(period_buckets(Granularity::Week, today).len(), 12);
    assert_eq!(period_buckets(Granularity::Month, today).len(), 12);
    assert_eq!(period_buckets(Granularity::Year, today).len(), 3);
}

#[test]
fn test_day_window_ends_today_and_starts_30_days_back() {
    let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
    assert_eq!(buckets.first().expect("first").key, "2024-03-01");
    assert_eq!(buckets.last().expect("last").key, "2024-03-31");
}

#[test]
fn test_week_keys_are_sundays_even_from_midweek() {
    // 2024-04-03 is a Wednesday.
    let buckets = period_buckets(Granularity::Week, date(2024, 4, 3));
    for bucket in &buckets {
        let d = NaiveDate::parse_from_str(&bucket.key, "%Y-%m-%d").expect("key parses");
        assert_eq!(
            chrono::Datelike::weekday(&d).num_days_from_sunday(),
            0,
            "{} is not a Sunday",
            bucket.key
        );
    }
}

#[test]
fn test_lookback_start_bounds_the_fetch() {
    let today = date(2024, 3, 31);
    let start = lookback_start(Granularity::Month, today);
    assert_eq!(start, date(2023, 4, 1));
}

// =============================================================================
// Dense Merge
// =============================================================================

#[test]
fn test_trend_is_dense_over_the_full_window() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));

    assert_eq!(trend.chart_data.len(), 12);
    for point in &trend.chart_data {
        for brand in ["Northpeak", "Harbor & Co", "Loomworks"] {
            assert!(
                point.quantities.contains_key(brand),
                "{} missing {brand}",
                point.period
            );
        }
    }
}

#[test]
fn test_gaps_are_explicit_zeros() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));

    let february = trend
        .chart_data
        .iter()
        .find(|p| p.period == "2024-02-01")
        .expect("february bucket");
    assert_eq!(february.quantities["Harbor & Co"], 0);
    assert_eq!(february.quantities["Northpeak"], 8);
}

#[test]
fn test_rebuild_is_byte_identical() {
    let facts = monthly_facts();
    let today = date(2024, 3, 31);

    let first = serde_json::to_string(&build_brand_trend(&facts, Granularity::Month, today))
        .expect("serialize");
    let second = serde_json::to_string(&build_brand_trend(&facts, Granularity::Month, today))
        .expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn test_chart_json_shape_for_renderers() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));
    let json = serde_json::to_value(trend.chart_data.last().expect("point")).expect("serialize");

    // Brands are sibling fields of period/label, not nested.
    assert_eq!(json["period"], "2024-03-01");
    assert_eq!(json["label"], "Mar 24");
    assert_eq!(json["Northpeak"], 15);
    assert_eq!(json["Loomworks"], 9);
    assert!(json.get("quantities").is_none());
}

#[test]
fn test_empty_facts_produce_empty_trend_not_zero_grid() {
    let trend = build_brand_trend(&[], Granularity::Month, date(2024, 3, 31));
    assert!(trend.is_empty());
    assert!(trend.brands.is_empty());
}

// =============================================================================
// Colors
// =============================================================================

#[test]
fn test_colors_follow_first_occurrence_order() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));

    let names: Vec<&str> = trend.brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Northpeak", "Harbor & Co", "Loomworks"]);
    assert_eq!(trend.brands[0].color, BRAND_PALETTE[0]);
    assert_eq!(trend.brands[2].color, BRAND_PALETTE[2]);
}

#[test]
fn test_palette_wraps_after_eight_brands() {
    let facts: Vec<TrendFact> = (0..9)
        .map(|i| fact(2024, 3, 1, &format!("Brand{i}"), 1))
        .collect();
    let trend = build_brand_trend(&facts, Granularity::Month, date(2024, 3, 31));

    assert_eq!(trend.brands.len(), 9);
    assert_eq!(trend.brands[8].color, BRAND_PALETTE[0]);
}

// =============================================================================
// Latest Snapshot
// =============================================================================

#[test]
fn test_snapshot_is_latest_bucket_without_zero_brands() {
    let mut facts = monthly_facts();
    // Northpeak goes quiet in the latest month.
    facts.retain(|f| !(f.brand_name == "Northpeak" && f.period_date == date(2024, 3, 1)));

    let trend = build_brand_trend(&facts, Granularity::Month, date(2024, 3, 31));
    let snapshot = latest_snapshot(&trend);

    let names: Vec<&str> = snapshot.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Harbor & Co", "Loomworks"]);
    assert!(snapshot.iter().all(|s| s.value > 0));
}

#[test]
fn test_snapshot_colors_match_series_colors() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));
    let snapshot = latest_snapshot(&trend);

    for slice in &snapshot {
        let brand = trend
            .brands
            .iter()
            .find(|b| b.name == slice.name)
            .expect("brand exists in series");
        assert_eq!(slice.color, brand.color);
    }
}

#[test]
fn test_snapshot_serializes_name_value_color() {
    let trend = build_brand_trend(&monthly_facts(), Granularity::Month, date(2024, 3, 31));
    let snapshot = latest_snapshot(&trend);
    let json: Value = serde_json::to_value(&snapshot).expect("serialize");

    let first = &json[0];
    assert!(first["name"].is_string());
    assert!(first["value"].is_i64());
    assert!(first["color"].as_str().expect("color").starts_with('#'));
}
