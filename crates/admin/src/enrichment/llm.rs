//! LLM-backed product enrichment via the Claude API.

use serde::Deserialize;
use tracing::instrument;

use crate::claude::{ClaudeClient, Message};

use super::{EnrichmentError, EnrichmentInput, ProductEnrichment};

const SYSTEM_PROMPT: &str = "You are a product catalog assistant. Given a product, \
    respond with a single JSON object and nothing else. The object has exactly \
    three keys: \"color\", \"material\", \"category\". Each value is a short \
    capitalized string, or null when the product text does not support a \
    confident answer. Do not invent attributes.";

/// Shape the model is instructed to return.
#[derive(Debug, Deserialize)]
struct LlmAttributes {
    color: Option<String>,
    material: Option<String>,
    category: Option<String>,
}

/// Claude-backed enricher.
#[derive(Clone)]
pub struct LlmEnricher {
    client: ClaudeClient,
}

impl LlmEnricher {
    #[must_use]
    pub const fn new(client: ClaudeClient) -> Self {
        Self { client }
    }

    /// Ask the model for product attributes.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call fails or the response is not the
    /// strict JSON shape the prompt demands. Callers fall back to the
    /// rule-based enricher on any error.
    #[instrument(skip(self, input), fields(product = %input.name))]
    pub async fn enrich(
        &self,
        input: &EnrichmentInput,
    ) -> Result<ProductEnrichment, EnrichmentError> {
        let prompt = build_prompt(input);
        let response = self
            .client
            .chat(vec![Message::user(prompt)], Some(SYSTEM_PROMPT.to_string()))
            .await?;

        parse_attributes(&response.text())
    }
}

fn build_prompt(input: &EnrichmentInput) -> String {
    let mut prompt = format!("Product name: {}\nBrand: {}", input.name, input.brand);
    if let Some(description) = &input.description {
        prompt.push_str("\nDescription: ");
        prompt.push_str(description);
    }
    prompt
}

/// Extract and parse the JSON object from the model's text.
///
/// Tolerates prose or code fences around the object by slicing from the
/// first `{` to the last `}`.
fn parse_attributes(text: &str) -> Result<ProductEnrichment, EnrichmentError> {
    let start = text.find('{').ok_or(EnrichmentError::MissingJson)?;
    let end = text.rfind('}').ok_or(EnrichmentError::MissingJson)?;
    if end < start {
        return Err(EnrichmentError::MissingJson);
    }

    let attributes: LlmAttributes = serde_json::from_str(&text[start..=end])
        .map_err(|e| EnrichmentError::Parse(e.to_string()))?;

    Ok(ProductEnrichment {
        color: non_empty(attributes.color),
        material: non_empty(attributes.material),
        category: non_empty(attributes.category),
    })
}

/// Normalize blank or literal-"null" strings the model sometimes emits.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case("null"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let enrichment = parse_attributes(
            r#"{"color": "Black", "material": "Leather", "category": "Footwear"}"#,
        )
        .expect("parse");
        assert_eq!(enrichment.color.as_deref(), Some("Black"));
        assert_eq!(enrichment.material.as_deref(), Some("Leather"));
        assert_eq!(enrichment.category.as_deref(), Some("Footwear"));
    }

    #[test]
    fn test_parse_json_inside_code_fence() {
        let text = "```json\n{\"color\": null, \"material\": \"Wool\", \"category\": null}\n```";
        let enrichment = parse_attributes(text).expect("parse");
        assert_eq!(enrichment.color, None);
        assert_eq!(enrichment.material.as_deref(), Some("Wool"));
    }

    #[test]
    fn test_literal_null_string_treated_as_absent() {
        let enrichment = parse_attributes(
            r#"{"color": "null", "material": "  ", "category": "Home"}"#,
        )
        .expect("parse");
        assert_eq!(enrichment.color, None);
        assert_eq!(enrichment.material, None);
        assert_eq!(enrichment.category.as_deref(), Some("Home"));
    }

    #[test]
    fn test_missing_json_is_an_error() {
        assert!(matches!(
            parse_attributes("I cannot determine the attributes."),
            Err(EnrichmentError::MissingJson)
        ));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            parse_attributes(r#"{"color": }"#),
            Err(EnrichmentError::Parse(_))
        ));
    }

    #[test]
    fn test_prompt_includes_description_when_present() {
        let input = EnrichmentInput {
            name: "Canvas Tote".to_string(),
            brand: "Zenith".to_string(),
            description: Some("Roomy weekend bag".to_string()),
        };
        let prompt = build_prompt(&input);
        assert!(prompt.contains("Canvas Tote"));
        assert!(prompt.contains("Description: Roomy weekend bag"));
    }
}
