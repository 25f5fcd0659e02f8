//! LLM client abstraction layer.
//!
//! A trait-based abstraction over LLM chat completion so the chat agent can
//! run against a hosted model in production (via the `genai` crate) and a
//! scripted mock in tests.

mod client;
mod genai;
mod mock;
mod types;

pub use client::LLMClient;
pub use genai::GenAIClient;
pub use mock::{MockLLMClient, MockResponse};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole, ToolCall, ToolDefinition};

/// Errors that can occur when talking to an LLM backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("{provider} request failed: {message}")]
    Api { provider: String, message: String },

    #[error("LLM request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("LLM configuration error: {0}")]
    Configuration(String),
}
