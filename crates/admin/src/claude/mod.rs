//! Claude API integration for AI-assisted product enrichment.
//!
//! Only the non-streaming Messages API is used: enrichment is a single
//! request/response exchange, parsed as strict JSON.

pub mod client;
pub mod error;
pub mod types;

pub use client::ClaudeClient;
pub use error::ClaudeError;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message};
