//! Scripted LLM client for tests.

use super::client::LLMClient;
use super::types::{LLMRequest, LLMResponse, ToolCall};
use super::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// LLM client that replays a queue of canned responses.
pub struct MockLLMClient {
    responses: Mutex<VecDeque<MockResponse>>,
    name: String,
}

/// One scripted response for [`MockLLMClient`].
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub error: Option<LlmError>,
}

impl MockResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            error: None,
        }
    }

    pub fn with_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            error: None,
        }
    }

    pub fn error(error: LlmError) -> Self {
        Self {
            content: String::new(),
            tool_calls: Vec::new(),
            error: Some(error),
        }
    }
}

impl MockLLMClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            name: "MockLLM".to_string(),
        }
    }

    pub fn add_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        let mut queue = self.responses.lock().unwrap();
        for response in responses {
            queue.push_back(response);
        }
    }

    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// Scripted `search_arxiv` tool call.
    pub fn search_arxiv_call(call_id: impl Into<String>, topic: impl Into<String>) -> ToolCall {
        ToolCall {
            call_id: call_id.into(),
            name: "search_arxiv".to_string(),
            arguments: serde_json::json!({ "topic": topic.into() }),
        }
    }

    /// Scripted `get_paper_info` tool call.
    pub fn get_paper_info_call(
        call_id: impl Into<String>,
        paper_id: impl Into<String>,
    ) -> ToolCall {
        ToolCall {
            call_id: call_id.into(),
            name: "get_paper_info".to_string(),
            arguments: serde_json::json!({ "paper_id": paper_id.into() }),
        }
    }
}

impl Default for MockLLMClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn chat(&self, _request: LLMRequest) -> Result<LLMResponse, LlmError> {
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse {
                error: Some(error), ..
            }) => Err(error),
            Some(response) => Ok(LLMResponse::with_tool_calls(
                response.content,
                response.tool_calls,
                Duration::from_millis(1),
            )),
            None => Ok(LLMResponse::text("", Duration::from_millis(1))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
