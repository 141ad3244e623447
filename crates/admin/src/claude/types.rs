//! Request/response types for the Anthropic Messages API.

use serde::{Deserialize, Serialize};

/// A chat message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// A content block in a response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    /// Any block type this client does not consume (tool use, thinking, ...).
    #[serde(other)]
    Other,
}

/// Response body from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
}

impl ChatResponse {
    /// Concatenated text of all text blocks.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_text_blocks() {
        let json = r#"{
            "id": "msg_01",
            "model": "claude-sonnet-4-20250514",
            "content": [
                {"type": "text", "text": "{\"color\":"},
                {"type": "text", "text": "\"Black\"}"}
            ],
            "stop_reason": "end_turn"
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.text(), "{\"color\":\"Black\"}");
    }

    #[test]
    fn test_unknown_block_types_are_tolerated() {
        let json = r#"{
            "id": "msg_02",
            "model": "claude-sonnet-4-20250514",
            "content": [{"type": "tool_use"}, {"type": "text", "text": "ok"}],
            "stop_reason": "end_turn"
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.text(), "ok");
    }

    #[test]
    fn test_request_omits_empty_system() {
        let request = ChatRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 512,
            messages: vec![Message::user("hi")],
            system: None,
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("system").is_none());
    }
}
