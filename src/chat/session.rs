//! Interactive chat session over stdin/stdout.

use std::io::Write as _;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::{Agent, McpToolbox, ToolDispatch};
use crate::llm::ChatMessage;
use crate::utils::display::stdout_is_terminal;

/// Standing instructions for the research assistant.
const SYSTEM_PROMPT: &str = "You are a research assistant that helps users find and discuss \
academic papers. Use the available tools to search arXiv and to look up stored paper \
metadata. Keep answers concise and only state information that comes from the tool results.";

/// The interactive read-eval loop.
///
/// `quit` or `exit` (case-insensitive) ends the session; errors from a query
/// are printed and the loop continues. Conversation history carries across
/// queries within one session.
pub struct ChatSession {
    agent: Agent,
    toolbox: McpToolbox,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(agent: Agent, toolbox: McpToolbox) -> Self {
        Self {
            agent,
            toolbox,
            history: vec![ChatMessage::system(SYSTEM_PROMPT)],
        }
    }

    fn print_banner(&self) {
        let tools = self.toolbox.definitions();
        if stdout_is_terminal() {
            println!("{}", "Research Scout chat".bold());
        } else {
            println!("Research Scout chat");
        }
        println!("Tools loaded from the research server:");
        for tool in &tools {
            println!("  - {}: {}", tool.name, tool.description);
        }
        println!("Type 'quit' or 'exit' to leave.\n");
    }

    /// Run the loop until EOF or an exit command.
    pub async fn run(mut self) -> anyhow::Result<()> {
        self.print_banner();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("You: ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let query = line.trim();
            if query.is_empty() {
                continue;
            }
            if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
                break;
            }

            self.history.push(ChatMessage::user(query));
            match self.agent.respond(&mut self.history, &self.toolbox).await {
                Ok(answer) => {
                    if stdout_is_terminal() {
                        println!("\n{} {answer}\n", "Assistant:".green().bold());
                    } else {
                        println!("\nAssistant: {answer}\n");
                    }
                }
                Err(e) => {
                    // Per-query failures are reported and the session goes on;
                    // the failed query is dropped from the history.
                    self.history.pop();
                    eprintln!("Error: {e}");
                }
            }
        }

        self.toolbox.shutdown().await;
        Ok(())
    }
}
