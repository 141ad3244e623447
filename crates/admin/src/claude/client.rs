//! Claude API client.
//!
//! Thin non-streaming wrapper over the Anthropic Messages API. Enrichment
//! sends one prompt per product and consumes the complete response, so no
//! SSE handling is needed.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClaudeConfig;

use super::error::{ApiErrorResponse, ClaudeError};
use super::types::{ChatRequest, ChatResponse, Message};

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    messages_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client against the production API endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &ClaudeConfig) -> Self {
        Self::with_base_url(config, ANTHROPIC_BASE_URL)
    }

    /// Create a client against an alternate endpoint.
    ///
    /// Used by tests to point the client at a local stub (or nowhere, to
    /// exercise failure paths).
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn with_base_url(config: &ClaudeConfig, base_url: &str) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                messages_url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            }),
        }
    }

    /// Model ID this client sends requests for.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Send a chat request and get the complete response.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error
    /// response.
    #[instrument(skip(self, messages), fields(model = %self.inner.model))]
    pub async fn chat(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
    ) -> Result<ChatResponse, ClaudeError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages,
            system,
        };

        let response = self
            .inner
            .client
            .post(&self.inner.messages_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| ClaudeError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(handle_error_status(status, response).await)
        }
    }
}

/// Map an error status code to a `ClaudeError`.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> ClaudeError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return ClaudeError::RateLimited(retry_after);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return ClaudeError::Unauthorized("Invalid API key".to_string());
    }

    match response.text().await {
        Ok(body) => {
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                ClaudeError::Api {
                    error_type: api_error.error.error_type,
                    message: api_error.error.message,
                }
            } else {
                ClaudeError::Api {
                    error_type: "unknown".to_string(),
                    message: body,
                }
            }
        }
        Err(e) => ClaudeError::Http(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> ClaudeConfig {
        ClaudeConfig {
            api_key: SecretString::from("sk-ant-REDACTED"),
            model: "claude-sonnet-4-20250514".to_string(),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = ClaudeClient::with_base_url(&test_config(), "http://127.0.0.1:4010/");
        assert_eq!(client.inner.messages_url, "http://127.0.0.1:4010/v1/messages");
    }

    #[test]
    fn test_default_endpoint() {
        let client = ClaudeClient::new(&test_config());
        assert_eq!(
            client.inner.messages_url,
            format!("{ANTHROPIC_BASE_URL}/v1/messages")
        );
    }

    #[test]
    fn test_claude_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<ClaudeClient>();
        assert_send_sync::<ClaudeClient>();
    }
}
