//! Period bucket generation for trend charts.
//!
//! A bucket is one interval on the shared chart timeline. The generator is
//! pure: given a granularity and a reference date it always produces the same
//! ordered sequence of buckets, independent of which facts exist.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Chart granularity selected by the dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Last 30 days, one bucket per calendar day.
    Day,
    /// Last 12 weeks, Sunday-aligned.
    Week,
    /// Last 12 months, first-of-month keys.
    #[default]
    Month,
    /// Last 3 years, January 1 keys.
    Year,
}

impl Granularity {
    /// Lowercase name, matching the aggregation function's `period_type`
    /// parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(format!("invalid granularity: {s}")),
        }
    }
}

/// One canonical period on the chart timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    /// Normalized `YYYY-MM-DD` key used for fact lookup. Lexicographic order
    /// equals chronological order.
    pub key: String,
    /// Human label for the axis ("05 Mar", "Mar 24", "2024").
    pub label: String,
}

/// Generate the ordered bucket sequence for a granularity, ending at `today`.
///
/// The sequence covers the granularity's fixed lookback window, inclusive of
/// both ends, strictly ascending, with no duplicate keys. Buckets exist
/// whether or not any activity fell inside them; gap filling happens at merge
/// time.
#[must_use]
pub fn period_buckets(granularity: Granularity, today: NaiveDate) -> Vec<PeriodBucket> {
    bucket_dates(granularity, today)
        .into_iter()
        .map(|date| PeriodBucket {
            key: date.format("%Y-%m-%d").to_string(),
            label: bucket_label(granularity, date),
        })
        .collect()
}

/// Earliest bucket date for the lookback window.
///
/// Used as the lower bound of the SQL fetch so the store never returns facts
/// the chart cannot place.
#[must_use]
pub fn lookback_start(granularity: Granularity, today: NaiveDate) -> NaiveDate {
    bucket_dates(granularity, today)
        .into_iter()
        .next()
        .unwrap_or(today)
}

/// Canonical start dates for the window, deduplicated and ascending.
///
/// The ordered set guards the no-duplicates invariant; week snapping in
/// particular must never emit the same Sunday twice.
fn bucket_dates(granularity: Granularity, today: NaiveDate) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();

    match granularity {
        Granularity::Day => {
            // 30 days back plus today itself: 31 buckets.
            for i in 0..=30 {
                dates.insert(sub_days(today, i));
            }
        }
        Granularity::Week => {
            for i in 0..12 {
                dates.insert(sunday_of(sub_days(today, i * 7)));
            }
        }
        Granularity::Month => {
            for i in 0..12 {
                let month = today
                    .checked_sub_months(Months::new(i))
                    .expect("date within chrono range");
                dates.insert(month.with_day(1).expect("day 1 is valid for every month"));
            }
        }
        Granularity::Year => {
            for i in 0..3 {
                dates.insert(
                    NaiveDate::from_ymd_opt(today.year() - i, 1, 1)
                        .expect("january 1 is valid for every year"),
                );
            }
        }
    }

    dates
}

/// Axis label for a bucket start date.
fn bucket_label(granularity: Granularity, date: NaiveDate) -> String {
    match granularity {
        Granularity::Day | Granularity::Week => date.format("%d %b").to_string(),
        Granularity::Month => date.format("%b %y").to_string(),
        Granularity::Year => date.format("%Y").to_string(),
    }
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .expect("date within chrono range")
}

/// Snap a date back to its week's Sunday (day-of-week 0).
fn sunday_of(date: NaiveDate) -> NaiveDate {
    sub_days(date, u64::from(date.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_day_buckets_cover_last_30_days_inclusive() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        assert_eq!(buckets.len(), 31);
        assert_eq!(buckets.first().expect("first").key, "2024-03-01");
        assert_eq!(buckets.last().expect("last").key, "2024-03-31");
    }

    #[test]
    fn test_day_buckets_strictly_ascending() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 31));
        for pair in buckets.windows(2) {
            assert!(pair[0].key < pair[1].key);
        }
    }

    #[test]
    fn test_week_buckets_sunday_aligned() {
        // 2024-03-31 is itself a Sunday.
        let buckets = period_buckets(Granularity::Week, date(2024, 3, 31));
        assert_eq!(buckets.len(), 12);
        for bucket in &buckets {
            let d = NaiveDate::parse_from_str(&bucket.key, "%Y-%m-%d").expect("key parses");
            assert_eq!(d.weekday().num_days_from_sunday(), 0, "key {}", bucket.key);
        }
        assert_eq!(buckets.last().expect("last").key, "2024-03-31");
    }

    #[test]
    fn test_week_buckets_from_midweek_reference() {
        // Wednesday reference still snaps to the enclosing week's Sunday.
        let buckets = period_buckets(Granularity::Week, date(2024, 4, 3));
        assert_eq!(buckets.last().expect("last").key, "2024-03-31");
    }

    #[test]
    fn test_month_buckets_first_of_month() {
        let buckets = period_buckets(Granularity::Month, date(2024, 3, 15));
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.first().expect("first").key, "2023-04-01");
        assert_eq!(buckets.last().expect("last").key, "2024-03-01");
        assert_eq!(buckets.last().expect("last").label, "Mar 24");
    }

    #[test]
    fn test_month_buckets_handle_month_end_reference() {
        // Subtracting months from Jan 31 clamps before snapping to day 1.
        let buckets = period_buckets(Granularity::Month, date(2024, 1, 31));
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.first().expect("first").key, "2023-02-01");
    }

    #[test]
    fn test_year_buckets() {
        let buckets = period_buckets(Granularity::Year, date(2024, 6, 1));
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["2022-01-01", "2023-01-01", "2024-01-01"]);
        assert_eq!(buckets.last().expect("last").label, "2024");
    }

    #[test]
    fn test_day_label_format() {
        let buckets = period_buckets(Granularity::Day, date(2024, 3, 5));
        assert_eq!(buckets.last().expect("last").label, "05 Mar");
    }

    #[test]
    fn test_lookback_start_matches_first_bucket() {
        for granularity in [
            Granularity::Day,
            Granularity::Week,
            Granularity::Month,
            Granularity::Year,
        ] {
            let today = date(2024, 3, 31);
            let first = period_buckets(granularity, today)
                .first()
                .expect("non-empty")
                .key
                .clone();
            assert_eq!(
                lookback_start(granularity, today).format("%Y-%m-%d").to_string(),
                first
            );
        }
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!("week".parse::<Granularity>(), Ok(Granularity::Week));
        assert!("hour".parse::<Granularity>().is_err());
    }
}
