//! Sparse-to-dense merge of trend facts onto the bucket timeline.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::buckets::PeriodBucket;

/// One observed (period, brand, quantity) row from the aggregation store.
///
/// Facts are sparse: a (bucket, brand) pair with no activity simply has no
/// row. The merge fills those gaps with explicit zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendFact {
    /// Period start date, already truncated to the requested granularity by
    /// the aggregation function.
    pub period_date: NaiveDate,
    pub brand_name: String,
    pub total_quantity: i64,
}

/// One dense chart row: the bucket plus a quantity for every observed brand.
///
/// `quantities` serializes flattened, so each brand appears as a sibling
/// field next to `period` and `label` - the shape stacked/area renderers
/// expect. A `BTreeMap` keeps serialization deterministic. Flattening means
/// a brand literally named `period` or `label` would collide with those
/// fields in the JSON; the renderer contract shares the field namespace
/// with brand names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Bucket key (`YYYY-MM-DD`).
    pub period: String,
    /// Axis label for the bucket.
    pub label: String,
    /// Quantity per brand; every observed brand is present, zero when the
    /// brand had no activity in this bucket.
    #[serde(flatten)]
    pub quantities: BTreeMap<String, i64>,
}

/// Distinct brand names in first-occurrence order.
///
/// This order drives color assignment, so it must depend only on the order
/// facts arrive in - never on alphabetical sorting.
#[must_use]
pub fn brand_names(facts: &[TrendFact]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut brands = Vec::new();
    for fact in facts {
        if seen.insert(fact.brand_name.as_str()) {
            brands.push(fact.brand_name.clone());
        }
    }
    brands
}

/// Merge sparse facts against the bucket sequence into dense chart points.
///
/// Every returned point carries a quantity for every brand observed anywhere
/// in `facts` (zero when absent), so each brand's series is defined for every
/// bucket. Duplicate (bucket, brand) rows are summed.
///
/// An empty fact list yields an empty result - "no data at all" is
/// distinguished from "all buckets zero" by the caller before rendering.
#[must_use]
pub fn merge_facts(buckets: &[PeriodBucket], facts: &[TrendFact]) -> Vec<ChartPoint> {
    if facts.is_empty() {
        return Vec::new();
    }

    let brands = brand_names(facts);

    let mut lookup: HashMap<(String, &str), i64> = HashMap::new();
    for fact in facts {
        let key = fact.period_date.format("%Y-%m-%d").to_string();
        *lookup.entry((key, fact.brand_name.as_str())).or_insert(0) += fact.total_quantity;
    }

    buckets
        .iter()
        .map(|bucket| {
            let quantities = brands
                .iter()
                .map(|brand| {
                    let quantity = lookup
                        .get(&(bucket.key.clone(), brand.as_str()))
                        .copied()
                        .unwrap_or(0);
                    (brand.clone(), quantity)
                })
                .collect();

            ChartPoint {
                period: bucket.key.clone(),
                label: bucket.label.clone(),
                quantities,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::buckets::{Granularity, period_buckets};

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
    fn test_empty_facts_yield_empty_chart() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        assert!(merge_facts(&buckets, &[]).is_empty());
    }

    #[test]
    fn test_every_point_has_every_brand() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        // Acme only appears on the 10th, Zenith only on the 20th.
        let facts = vec![
            fact(2024, 3, 10, "Acme", 4),
            fact(2024, 3, 20, "Zenith", 7),
        ];

        let chart = merge_facts(&buckets, &facts);
        assert_eq!(chart.len(), buckets.len());
        for point in &chart {
            assert!(point.quantities.contains_key("Acme"), "{}", point.period);
            assert!(point.quantities.contains_key("Zenith"), "{}", point.period);
        }
    }

    #[test]
    fn test_missing_combinations_default_to_zero() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        let facts = vec![fact(2024, 3, 10, "Acme", 4)];

        let chart = merge_facts(&buckets, &facts);
        let on_tenth = chart
            .iter()
            .find(|p| p.period == "2024-03-10")
            .expect("bucket exists");
        let on_eleventh = chart
            .iter()
            .find(|p| p.period == "2024-03-11")
            .expect("bucket exists");
        assert_eq!(on_tenth.quantities["Acme"], 4);
        assert_eq!(on_eleventh.quantities["Acme"], 0);
    }

    #[test]
    fn test_facts_outside_window_are_ignored() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        let facts = vec![
            fact(2023, 1, 1, "Acme", 100),
            fact(2024, 3, 10, "Acme", 4),
        ];

        let chart = merge_facts(&buckets, &facts);
        let total: i64 = chart.iter().map(|p| p.quantities["Acme"]).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        let facts = vec![fact(2024, 3, 10, "Acme", 4), fact(2024, 3, 10, "Acme", 2)];

        let chart = merge_facts(&buckets, &facts);
        let point = chart
            .iter()
            .find(|p| p.period == "2024-03-10")
            .expect("bucket exists");
        assert_eq!(point.quantities["Acme"], 6);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let buckets = period_buckets(Granularity::Week, date(2024, 3, 31));
        let facts = vec![
            fact(2024, 3, 24, "Acme", 4),
            fact(2024, 3, 31, "Zenith", 7),
            fact(2024, 3, 17, "Acme", 1),
        ];

        let first = serde_json::to_string(&merge_facts(&buckets, &facts)).expect("serialize");
        let second = serde_json::to_string(&merge_facts(&buckets, &facts)).expect("serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn test_brand_names_first_occurrence_order() {
        let facts = vec![
            fact(2024, 3, 10, "Zenith", 1),
            fact(2024, 3, 11, "Acme", 1),
            fact(2024, 3, 12, "Zenith", 1),
        ];
        assert_eq!(brand_names(&facts), ["Zenith", "Acme"]);
    }

    #[test]
    fn test_chart_point_serializes_brands_as_siblings() {
        let buckets = period_buckets(Granularity::Year, date(2024, 6, 1));
        let facts = vec![fact(2024, 1, 1, "Acme", 3)];

        let chart = merge_facts(&buckets, &facts);
        let json = serde_json::to_value(chart.last().expect("point")).expect("serialize");
        assert_eq!(json["period"], "2024-01-01");
        assert_eq!(json["label"], "2024");
        assert_eq!(json["Acme"], 3);
    }
}
