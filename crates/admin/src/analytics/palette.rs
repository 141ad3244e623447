//! Brand color assignment for chart series.

use serde::Serialize;

use super::series::TrendFact;
use super::series::brand_names;

/// Fixed chart palette. Brands wrap around when there are more brands than
/// colors.
pub const BRAND_PALETTE: [&str; 8] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1", "#d084d0", "#ffb347", "#67b7dc",
];

/// A brand with its assigned series color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandInfo {
    pub name: String,
    pub color: &'static str,
}

/// Assign palette colors to brands by first-occurrence order in the facts.
///
/// Assignment is deterministic for a given fact order: the first brand seen
/// gets the first color, and so on, wrapping modulo the palette length. It is
/// deliberately independent of alphabetical order so a brand keeps its color
/// when unrelated brands appear or disappear earlier in the alphabet.
#[must_use]
pub fn assign_colors(facts: &[TrendFact]) -> Vec<BrandInfo> {
    brand_names(facts)
        .into_iter()
        .enumerate()
        .map(|(index, name)| BrandInfo {
            name,
            color: BRAND_PALETTE[index % BRAND_PALETTE.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fact(day: u32, brand: &str, qty: i64) -> TrendFact {
        TrendFact {
            period_date: NaiveDate::from_ymd_opt(2024, 3, day).expect("valid test date"),
            brand_name: brand.to_string(),
            total_quantity: qty,
        }
    }

    #[test]
    fn test_colors_follow_first_occurrence_order() {
        // "Zenith" sorts after "Acme" but is seen first, so it gets color 0.
        let facts = vec![fact(1, "Zenith", 1), fact(2, "Acme", 1)];
        let brands = assign_colors(&facts);
        assert_eq!(brands[0].name, "Zenith");
        assert_eq!(brands[0].color, BRAND_PALETTE[0]);
        assert_eq!(brands[1].name, "Acme");
        assert_eq!(brands[1].color, BRAND_PALETTE[1]);
    }

    #[test]
    fn test_assignment_stable_under_quantity_changes() {
        let facts_a = vec![fact(1, "Zenith", 1), fact(2, "Acme", 5)];
        let facts_b = vec![fact(3, "Zenith", 90), fact(4, "Acme", 2)];
        assert_eq!(assign_colors(&facts_a), assign_colors(&facts_b));
    }

    #[test]
    fn test_palette_wraps_cyclically() {
        let facts: Vec<TrendFact> = (0..9u32)
            .map(|i| fact(1 + i, &format!("Brand{i}"), 1))
            .collect();
        let brands = assign_colors(&facts);
        assert_eq!(brands.len(), 9);
        assert_eq!(brands[8].color, brands[0].color);
        assert_eq!(brands[8].color, BRAND_PALETTE[0]);
    }

    #[test]
    fn test_empty_facts_yield_no_brands() {
        assert!(assign_colors(&[]).is_empty());
    }
}
