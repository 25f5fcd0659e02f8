//! MCP protocol integration.
//!
//! - [`tools`]: tool definitions and handlers backed by the research service
//! - [`server`]: the pmcp server exposing those tools over stdio or HTTP

pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::{Tool, ToolHandler, ToolRegistry};
