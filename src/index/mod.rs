//! External paper-index clients behind a narrow trait.
//!
//! The search operation talks to the index through [`PaperIndex`] so the
//! production arXiv client and the deterministic [`MockIndex`] are
//! interchangeable. The trait is deliberately small: one relevance-ranked
//! search returning normalized `(id, record)` pairs in rank order.

mod arxiv;
pub mod mock;

pub use arxiv::ArxivIndex;
pub use mock::MockIndex;

use crate::models::PaperRecord;
use async_trait::async_trait;

/// A search request against an external paper index.
#[derive(Debug, Clone)]
pub struct IndexQuery {
    /// Free-text topic to search for
    pub topic: String,

    /// Maximum number of results to return
    pub max_results: usize,
}

impl IndexQuery {
    pub fn new(topic: impl Into<String>, max_results: usize) -> Self {
        Self {
            topic: topic.into(),
            max_results,
        }
    }
}

/// One normalized search hit: the paper's short identifier plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPaper {
    pub id: String,
    pub record: PaperRecord,
}

/// Interface to an external paper index.
#[async_trait]
pub trait PaperIndex: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this index (e.g. "arxiv")
    fn id(&self) -> &str;

    /// Human-readable name of this index
    fn name(&self) -> &str;

    /// Run a relevance-ranked search, returning up to `query.max_results`
    /// papers in rank order.
    async fn search(&self, query: &IndexQuery) -> Result<Vec<IndexedPaper>, IndexError>;
}

/// Errors that can occur when querying an index
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (Atom feed, JSON, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimit,

    /// API error from the index
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        IndexError::Network(err.to_string())
    }
}
