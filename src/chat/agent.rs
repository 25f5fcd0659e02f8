//! The LLM/tool-call loop for one user query.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::chat::ChatError;
use crate::config::LlmConfig;
use crate::llm::{ChatMessage, LLMClient, LLMRequest, ToolDefinition};

/// How the agent lists and invokes tools.
///
/// Production dispatch goes over MCP to the spawned tool server; tests plug
/// in a local fake.
#[async_trait]
pub trait ToolDispatch: Send + Sync {
    /// Tool definitions to offer the LLM.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Invoke a tool and return its textual result.
    async fn call(&self, name: &str, arguments: Value) -> Result<String, ChatError>;
}

/// Drives the LLM until it produces a final answer, dispatching any tool
/// calls it makes along the way.
pub struct Agent {
    llm: Arc<dyn LLMClient>,
    temperature: f32,
    max_tokens: u32,
    max_tool_turns: usize,
}

impl Agent {
    pub fn new(llm: Arc<dyn LLMClient>, config: &LlmConfig, max_tool_turns: usize) -> Self {
        Self {
            llm,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            max_tool_turns,
        }
    }

    /// Answer the latest user message in `history`.
    ///
    /// On success the assistant/tool messages produced along the way are
    /// appended to `history`; on error `history` is left untouched, so a
    /// failed query never leaves a half-finished tool exchange behind.
    pub async fn respond(
        &self,
        history: &mut Vec<ChatMessage>,
        tools: &dyn ToolDispatch,
    ) -> Result<String, ChatError> {
        let definitions = tools.definitions();
        let mut working = history.clone();

        for _turn in 0..self.max_tool_turns {
            let request = LLMRequest::new(working.clone())
                .with_tools(definitions.clone())
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens);

            let response = self.llm.chat(request).await?;

            if !response.has_tool_calls() {
                working.push(ChatMessage::assistant(&response.content));
                *history = working;
                return Ok(response.content);
            }

            tracing::debug!("LLM requested {} tool calls", response.tool_calls.len());
            working.push(ChatMessage::assistant_with_tools(
                &response.content,
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                let output = tools.call(&call.name, call.arguments.clone()).await?;
                working.push(ChatMessage::tool_response(&call.call_id, output));
            }
        }

        Err(ChatError::TurnLimit(self.max_tool_turns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLLMClient, MockResponse};
    use std::sync::Mutex;

    /// Dispatch fake that records calls and replies with a fixed string.
    #[derive(Default)]
    struct RecordingDispatch {
        calls: Mutex<Vec<(String, Value)>>,
        fail: bool,
    }

    #[async_trait]
    impl ToolDispatch for RecordingDispatch {
        fn definitions(&self) -> Vec<ToolDefinition> {
            vec![ToolDefinition {
                name: "search_arxiv".to_string(),
                description: "Search arXiv".to_string(),
                parameters: serde_json::json!({"type": "object"}),
            }]
        }

        async fn call(&self, name: &str, arguments: Value) -> Result<String, ChatError> {
            if self.fail {
                return Err(ChatError::Tool("index unavailable".to_string()));
            }
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), arguments));
            Ok("[\"2301.12345\"]".to_string())
        }
    }

    fn agent_with(llm: MockLLMClient, max_turns: usize) -> Agent {
        Agent::new(Arc::new(llm), &LlmConfig::default(), max_turns)
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let llm = MockLLMClient::new();
        llm.add_response(MockResponse::text("No tools needed"));

        let agent = agent_with(llm, 4);
        let mut history = vec![ChatMessage::user("hello")];
        let answer = agent
            .respond(&mut history, &RecordingDispatch::default())
            .await
            .unwrap();

        assert_eq!(answer, "No tools needed");
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let llm = MockLLMClient::new();
        llm.add_responses([
            MockResponse::with_tool_calls(
                "",
                vec![MockLLMClient::search_arxiv_call("c1", "quantum computing")],
            ),
            MockResponse::text("Found one paper: 2301.12345"),
        ]);

        let dispatch = RecordingDispatch::default();
        let agent = agent_with(llm, 4);
        let mut history = vec![ChatMessage::user("find papers on quantum computing")];
        let answer = agent.respond(&mut history, &dispatch).await.unwrap();

        assert_eq!(answer, "Found one paper: 2301.12345");

        let calls = dispatch.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "search_arxiv");

        // user + assistant(tool call) + tool response + final assistant
        assert_eq!(history.len(), 4);
    }

    #[tokio::test]
    async fn test_tool_error_leaves_history_untouched() {
        let llm = MockLLMClient::new();
        llm.add_response(MockResponse::with_tool_calls(
            "",
            vec![MockLLMClient::search_arxiv_call("c1", "robotics")],
        ));

        let dispatch = RecordingDispatch {
            fail: true,
            ..Default::default()
        };
        let agent = agent_with(llm, 4);
        let mut history = vec![ChatMessage::user("find papers")];
        let result = agent.respond(&mut history, &dispatch).await;

        assert!(matches!(result, Err(ChatError::Tool(_))));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_turn_limit() {
        let llm = MockLLMClient::new();
        llm.add_responses([
            MockResponse::with_tool_calls(
                "",
                vec![MockLLMClient::search_arxiv_call("c1", "a")],
            ),
            MockResponse::with_tool_calls(
                "",
                vec![MockLLMClient::search_arxiv_call("c2", "b")],
            ),
        ]);

        let agent = agent_with(llm, 2);
        let mut history = vec![ChatMessage::user("loop forever")];
        let result = agent
            .respond(&mut history, &RecordingDispatch::default())
            .await;

        assert!(matches!(result, Err(ChatError::TurnLimit(2))));
    }
}
