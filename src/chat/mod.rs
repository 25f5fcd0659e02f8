//! Interactive chat client.
//!
//! The chat subcommand spawns the MCP tool server as a child process, hands
//! its tools to an LLM, and runs a read-eval loop on stdin. The pieces:
//!
//! - [`ToolDispatch`]: how the agent lists and invokes tools
//! - [`McpToolbox`]: dispatch backed by an MCP connection to the spawned
//!   server
//! - [`Agent`]: the LLM/tool-call loop for one user query
//! - [`ChatSession`]: the interactive loop itself

mod agent;
mod session;
mod toolbox;

pub use agent::{Agent, ToolDispatch};
pub use session::ChatSession;
pub use toolbox::McpToolbox;

use crate::llm::LlmError;

/// Errors surfaced while answering one chat query.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Tool error: {0}")]
    Tool(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Conversation exceeded {0} tool turns without a final answer")]
    TurnLimit(usize),
}
