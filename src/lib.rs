//! # Research Scout
//!
//! A research-assistant chatbot split across two cooperating processes: an
//! MCP tool server that searches arXiv and keeps paper metadata in a local
//! topic-partitioned store, and an interactive chat client that drives an
//! LLM with those tools.
//!
//! ## Architecture
//!
//! - [`models`]: core data structures (paper records, lookup results)
//! - [`store`]: topic-partitioned paper store (filesystem + in-memory)
//! - [`index`]: arXiv query client behind a narrow trait
//! - [`service`]: the search and lookup operations
//! - [`mcp`]: MCP tool definitions and the pmcp-based server
//! - [`llm`]: LLM client abstraction over the genai crate
//! - [`chat`]: the interactive agent client
//! - [`config`]: configuration management
//! - [`utils`]: HTTP client, retry, terminal rendering

pub mod chat;
pub mod config;
pub mod index;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod service;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use models::{PaperLookup, PaperRecord, TopicPartition};
pub use service::ResearchService;
pub use store::{FsStore, MemoryStore, PaperStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
