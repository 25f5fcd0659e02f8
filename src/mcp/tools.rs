//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::service::{ResearchService, DEFAULT_MAX_RESULTS};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_arxiv")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry exposing the research service's two operations.
    pub fn from_service(service: Arc<ResearchService>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: "search_arxiv".to_string(),
            description: "Search arXiv for research papers on a topic and store their \
                          metadata locally. Returns the IDs of the papers found."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "Topic to search for on arXiv"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return",
                        "default": DEFAULT_MAX_RESULTS
                    }
                },
                "required": ["topic"]
            }),
            handler: Arc::new(SearchArxivHandler {
                service: service.clone(),
            }),
        });

        registry.register(Tool {
            name: "get_paper_info".to_string(),
            description: "Get stored metadata for a paper by its ID, searching across \
                          all topic directories."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "paper_id": {
                        "type": "string",
                        "description": "ID of the paper to look up (e.g., '2301.12345')"
                    }
                },
                "required": ["paper_id"]
            }),
            handler: Arc::new(GetPaperInfoHandler { service }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{name}' not found"))?;

        tool.handler.execute(args).await
    }
}

/// Handler for searching arXiv and storing the results
#[derive(Debug)]
pub struct SearchArxivHandler {
    pub service: Arc<ResearchService>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchArxivHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;

        let max_results = args
            .get("max_results")
            .and_then(|v| v.as_u64())
            .unwrap_or(DEFAULT_MAX_RESULTS as u64) as usize;

        let ids = self
            .service
            .search(topic, max_results)
            .await
            .map_err(|e| e.to_string())?;

        serde_json::to_value(ids).map_err(|e| e.to_string())
    }
}

/// Handler for looking up stored paper metadata by ID
#[derive(Debug)]
pub struct GetPaperInfoHandler {
    pub service: Arc<ResearchService>,
}

#[async_trait::async_trait]
impl ToolHandler for GetPaperInfoHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let paper_id = args
            .get("paper_id")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'paper_id' parameter")?;

        let lookup = self.service.lookup(paper_id);
        Ok(Value::String(lookup.render(paper_id)))
    }
}
