//! AI-assisted product enrichment.
//!
//! Two strategies produce the same attribute set (color, material,
//! category):
//!
//! - [`RuleBasedEnricher`] - local keyword matching; pure and infallible.
//! - [`LlmEnricher`] - prompt-templated call to the Claude API.
//!
//! The configured [`Enricher`] selects between them. The LLM variant always
//! carries the rule-based enricher as its fallback: any API failure degrades
//! to local rules rather than surfacing an error to the caller. The result
//! is an explicit [`EnrichmentOutcome`] naming the strategy that actually
//! ran, so failure handling stays visible and testable instead of vanishing
//! into a catch-all.

pub mod llm;
pub mod rules;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{instrument, warn};

pub use llm::LlmEnricher;
pub use rules::RuleBasedEnricher;

use crate::claude::ClaudeError;

/// Product fields fed to an enricher.
#[derive(Debug, Clone)]
pub struct EnrichmentInput {
    pub name: String,
    pub brand: String,
    pub description: Option<String>,
}

impl EnrichmentInput {
    /// Lowercased text the rule-based matcher scans.
    #[must_use]
    pub fn haystack(&self) -> String {
        let mut text = format!("{} {}", self.name, self.brand);
        if let Some(description) = &self.description {
            text.push(' ');
            text.push_str(description);
        }
        text.to_lowercase()
    }
}

/// Attributes an enricher can derive. Absent fields stay untouched on the
/// product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEnrichment {
    pub color: Option<String>,
    pub material: Option<String>,
    pub category: Option<String>,
}

impl ProductEnrichment {
    /// Whether no attribute could be derived.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none() && self.material.is_none() && self.category.is_none()
    }
}

/// The strategy that produced an enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentSource {
    /// Local keyword rules, selected by configuration.
    Rules,
    /// Claude API call succeeded.
    Llm,
    /// Claude API call failed; local rules ran instead.
    RulesFallback,
}

/// Explicit result of one enrichment task.
///
/// Enrichment never throws past this point: an LLM failure is recorded in
/// `source`/`fallback_reason` and the rule-based result is returned.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentOutcome {
    pub enrichment: ProductEnrichment,
    pub source: EnrichmentSource,
    /// Why the LLM path was abandoned, when `source` is `rules_fallback`.
    pub fallback_reason: Option<String>,
}

/// Errors from the LLM enrichment path.
///
/// These never escape [`Enricher::enrich`]; they become the
/// `fallback_reason` of the outcome.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Claude API call failed.
    #[error("claude error: {0}")]
    Api(#[from] ClaudeError),

    /// The response contained no JSON object.
    #[error("no JSON object in model response")]
    MissingJson,

    /// The JSON object did not match the expected attribute shape.
    #[error("malformed enrichment JSON: {0}")]
    Parse(String),
}

/// The configured enrichment strategy.
pub enum Enricher {
    /// Local rules only.
    Rules(RuleBasedEnricher),
    /// Claude first, local rules on any failure.
    LlmWithFallback {
        llm: LlmEnricher,
        rules: RuleBasedEnricher,
    },
}

impl Enricher {
    /// Rule-based strategy.
    #[must_use]
    pub const fn rules() -> Self {
        Self::Rules(RuleBasedEnricher::new())
    }

    /// LLM strategy with the mandatory rule-based fallback.
    #[must_use]
    pub const fn llm_with_fallback(llm: LlmEnricher) -> Self {
        Self::LlmWithFallback {
            llm,
            rules: RuleBasedEnricher::new(),
        }
    }

    /// Run the configured strategy.
    ///
    /// Infallible by design: the LLM path degrades to rules, and rules
    /// always produce a (possibly empty) enrichment.
    #[instrument(skip(self, input), fields(product = %input.name))]
    pub async fn enrich(&self, input: &EnrichmentInput) -> EnrichmentOutcome {
        match self {
            Self::Rules(rules) => EnrichmentOutcome {
                enrichment: rules.enrich(input),
                source: EnrichmentSource::Rules,
                fallback_reason: None,
            },
            Self::LlmWithFallback { llm, rules } => match llm.enrich(input).await {
                Ok(enrichment) => EnrichmentOutcome {
                    enrichment,
                    source: EnrichmentSource::Llm,
                    fallback_reason: None,
                },
                Err(error) => {
                    warn!(%error, "LLM enrichment failed, falling back to rules");
                    EnrichmentOutcome {
                        enrichment: rules.enrich(input),
                        source: EnrichmentSource::RulesFallback,
                        fallback_reason: Some(error.to_string()),
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_strategy_reports_rules_source() {
        let enricher = Enricher::rules();
        let input = EnrichmentInput {
            name: "Black Leather Boot".to_string(),
            brand: "Acme".to_string(),
            description: None,
        };

        let outcome = enricher.enrich(&input).await;
        assert_eq!(outcome.source, EnrichmentSource::Rules);
        assert!(outcome.fallback_reason.is_none());
        assert_eq!(outcome.enrichment.color.as_deref(), Some("Black"));
    }

    #[test]
    fn test_haystack_includes_all_fields_lowercased() {
        let input = EnrichmentInput {
            name: "Canvas Tote".to_string(),
            brand: "Zenith".to_string(),
            description: Some("Roomy WEEKEND bag".to_string()),
        };
        assert_eq!(input.haystack(), "canvas tote zenith roomy weekend bag");
    }

    #[test]
    fn test_empty_enrichment() {
        assert!(ProductEnrichment::default().is_empty());
        let partial = ProductEnrichment {
            color: Some("Red".to_string()),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }
}
