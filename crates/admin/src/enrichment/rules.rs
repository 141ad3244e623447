//! Keyword-based product enrichment.
//!
//! Scans the product name, brand, and description for known attribute
//! keywords. First table entry that matches wins, so broader terms go later
//! in each table.

use super::{EnrichmentInput, ProductEnrichment};

/// Keyword to canonical color.
const COLOR_RULES: &[(&str, &str)] = &[
    ("black", "Black"),
    ("white", "White"),
    ("ivory", "White"),
    ("red", "Red"),
    ("crimson", "Red"),
    ("blue", "Blue"),
    ("navy", "Blue"),
    ("green", "Green"),
    ("olive", "Green"),
    ("yellow", "Yellow"),
    ("orange", "Orange"),
    ("purple", "Purple"),
    ("pink", "Pink"),
    ("brown", "Brown"),
    ("tan", "Brown"),
    ("beige", "Beige"),
    ("grey", "Grey"),
    ("gray", "Grey"),
    ("charcoal", "Grey"),
    ("silver", "Silver"),
    ("gold", "Gold"),
];

/// Keyword to canonical material.
const MATERIAL_RULES: &[(&str, &str)] = &[
    ("leather", "Leather"),
    ("suede", "Suede"),
    ("cotton", "Cotton"),
    ("denim", "Denim"),
    ("canvas", "Canvas"),
    ("wool", "Wool"),
    ("cashmere", "Cashmere"),
    ("silk", "Silk"),
    ("linen", "Linen"),
    ("polyester", "Polyester"),
    ("nylon", "Nylon"),
    ("fleece", "Fleece"),
    ("ceramic", "Ceramic"),
    ("glass", "Glass"),
    ("wood", "Wood"),
    ("oak", "Wood"),
    ("walnut", "Wood"),
    ("steel", "Steel"),
    ("aluminum", "Aluminum"),
    ("plastic", "Plastic"),
];

/// Keyword to canonical category.
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("sneaker", "Footwear"),
    ("boot", "Footwear"),
    ("sandal", "Footwear"),
    ("loafer", "Footwear"),
    ("shoe", "Footwear"),
    ("tee", "Apparel"),
    ("shirt", "Apparel"),
    ("hoodie", "Apparel"),
    ("sweater", "Apparel"),
    ("jacket", "Apparel"),
    ("coat", "Apparel"),
    ("dress", "Apparel"),
    ("jeans", "Apparel"),
    ("pants", "Apparel"),
    ("shorts", "Apparel"),
    ("tote", "Bags"),
    ("backpack", "Bags"),
    ("duffel", "Bags"),
    ("satchel", "Bags"),
    ("bag", "Bags"),
    ("wallet", "Accessories"),
    ("belt", "Accessories"),
    ("scarf", "Accessories"),
    ("hat", "Accessories"),
    ("cap", "Accessories"),
    ("sunglasses", "Accessories"),
    ("watch", "Accessories"),
    ("mug", "Home"),
    ("candle", "Home"),
    ("pillow", "Home"),
    ("blanket", "Home"),
    ("vase", "Home"),
    ("lamp", "Home"),
];

/// Local keyword matcher. Pure and infallible, so it doubles as the
/// fallback for the LLM strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedEnricher;

impl RuleBasedEnricher {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Derive attributes from the input text.
    ///
    /// Fields with no matching keyword stay `None`; the caller leaves the
    /// corresponding product columns untouched.
    #[must_use]
    pub fn enrich(&self, input: &EnrichmentInput) -> ProductEnrichment {
        let haystack = input.haystack();
        let words = tokenize(&haystack);
        ProductEnrichment {
            color: first_match(COLOR_RULES, &words),
            material: first_match(MATERIAL_RULES, &words),
            category: first_match(CATEGORY_RULES, &words),
        }
    }
}

/// Split lowercased text into alphanumeric words.
///
/// Matching on whole words keeps "tangerine" from matching "tan" and
/// "red" from matching inside "bordered".
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect()
}

fn first_match(rules: &[(&str, &str)], words: &[&str]) -> Option<String> {
    rules
        .iter()
        .find(|(keyword, _)| words.contains(keyword))
        .map(|(_, value)| (*value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: Option<&str>) -> EnrichmentInput {
        EnrichmentInput {
            name: name.to_string(),
            brand: "Acme".to_string(),
            description: description.map(ToString::to_string),
        }
    }

    #[test]
    fn test_matches_all_three_attributes() {
        let enrichment =
            RuleBasedEnricher::new().enrich(&input("Black Leather Boot", None));
        assert_eq!(enrichment.color.as_deref(), Some("Black"));
        assert_eq!(enrichment.material.as_deref(), Some("Leather"));
        assert_eq!(enrichment.category.as_deref(), Some("Footwear"));
    }

    #[test]
    fn test_description_contributes_keywords() {
        let enrichment = RuleBasedEnricher::new()
            .enrich(&input("Weekender", Some("navy canvas duffel for travel")));
        assert_eq!(enrichment.color.as_deref(), Some("Blue"));
        assert_eq!(enrichment.material.as_deref(), Some("Canvas"));
        assert_eq!(enrichment.category.as_deref(), Some("Bags"));
    }

    #[test]
    fn test_whole_word_matching_only() {
        // "tangerine" must not match the "tan" color rule.
        let enrichment = RuleBasedEnricher::new().enrich(&input("Tangerine Vase", None));
        assert_eq!(enrichment.color, None);
        assert_eq!(enrichment.category.as_deref(), Some("Home"));
    }

    #[test]
    fn test_synonyms_map_to_canonical_value() {
        let grey = RuleBasedEnricher::new().enrich(&input("Gray Wool Scarf", None));
        assert_eq!(grey.color.as_deref(), Some("Grey"));

        let charcoal = RuleBasedEnricher::new().enrich(&input("Charcoal Hoodie", None));
        assert_eq!(charcoal.color.as_deref(), Some("Grey"));
    }

    #[test]
    fn test_first_rule_wins() {
        // Both "sneaker" and "bag" appear; table order picks Footwear.
        let enrichment =
            RuleBasedEnricher::new().enrich(&input("Sneaker bag organizer", None));
        assert_eq!(enrichment.category.as_deref(), Some("Footwear"));
    }

    #[test]
    fn test_no_match_yields_empty_enrichment() {
        let enrichment = RuleBasedEnricher::new().enrich(&input("Gift Card", None));
        assert!(enrichment.is_empty());
    }
}
