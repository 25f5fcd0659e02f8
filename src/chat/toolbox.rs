//! MCP-backed tool dispatch.
//!
//! Spawns the tool server as a child process and talks MCP to it over the
//! child's stdio, exposing the server's tools to the agent loop.

use std::ffi::OsStr;

use async_trait::async_trait;
use rmcp::model::CallToolRequestParam;
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::ServiceExt;
use serde_json::Value;
use tokio::process::Command;

use crate::chat::{ChatError, ToolDispatch};
use crate::llm::ToolDefinition;

/// Tool dispatch over an MCP connection to a spawned tool server.
pub struct McpToolbox {
    service: RunningService<RoleClient, ()>,
    tools: Vec<ToolDefinition>,
}

impl McpToolbox {
    /// Spawn `program args...` as the tool server and connect to it.
    ///
    /// The child's stdin/stdout carry the MCP framing; its stderr is
    /// inherited so server logs stay visible.
    pub async fn connect<S: AsRef<OsStr>>(
        program: S,
        args: &[String],
    ) -> Result<Self, ChatError> {
        let transport = TokioChildProcess::new(Command::new(program.as_ref()).configure(|cmd| {
            for arg in args {
                cmd.arg(arg);
            }
        }))
        .map_err(|e| ChatError::Tool(format!("failed to spawn tool server: {e}")))?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| ChatError::Tool(format!("failed to connect to tool server: {e}")))?;

        let listed = service
            .list_tools(Default::default())
            .await
            .map_err(|e| ChatError::Tool(format!("failed to list tools: {e}")))?;

        let tools = listed
            .tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name.to_string(),
                description: tool
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .to_string(),
                parameters: Value::Object((*tool.input_schema).clone()),
            })
            .collect();

        Ok(Self { service, tools })
    }

    /// Close the MCP connection and let the child exit.
    pub async fn shutdown(self) {
        if let Err(e) = self.service.cancel().await {
            tracing::debug!("Tool server shutdown: {}", e);
        }
    }
}

/// Pull the text parts out of a tool result.
///
/// Goes through the serialized form so only the `{type: "text", text}` shape
/// matters, not the SDK's content enum.
fn result_text(result: &impl serde::Serialize) -> String {
    let value = serde_json::to_value(result).unwrap_or_default();
    match value.get("content") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("text").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

#[async_trait]
impl ToolDispatch for McpToolbox {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.clone()
    }

    async fn call(&self, name: &str, arguments: Value) -> Result<String, ChatError> {
        tracing::debug!("Calling tool '{}' with {}", name, arguments);

        let result = self
            .service
            .call_tool(CallToolRequestParam {
                meta: None,
                name: name.to_string().into(),
                arguments: arguments.as_object().cloned(),
                task: None,
            })
            .await
            .map_err(|e| ChatError::Tool(format!("'{name}' failed: {e}")))?;

        let text = result_text(&result);
        if result.is_error == Some(true) {
            return Err(ChatError::Tool(format!("'{name}' failed: {text}")));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_text_joins_text_parts() {
        let result = serde_json::json!({
            "content": [
                {"type": "text", "text": "line one"},
                {"type": "text", "text": "line two"},
            ]
        });
        assert_eq!(result_text(&result), "line one\nline two");
    }

    #[test]
    fn test_result_text_empty_content() {
        let result = serde_json::json!({"content": []});
        assert_eq!(result_text(&result), "");

        let no_content = serde_json::json!({});
        assert_eq!(result_text(&no_content), "");
    }
}
