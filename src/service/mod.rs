//! Search and lookup operations over the paper store.
//!
//! [`ResearchService`] ties an external [`PaperIndex`] to a [`PaperStore`]:
//! a search fetches papers for a topic and merges them into that topic's
//! partition; a lookup scans every partition for a paper identifier. Both
//! operations are single-shot and stateless between calls.

use std::sync::Arc;

use crate::index::{IndexError, IndexQuery, PaperIndex};
use crate::models::PaperLookup;
use crate::store::{PaperStore, StoreError};

/// Default number of papers fetched per search.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Errors surfaced by the search operation.
///
/// Lookups cannot fail: an absent identifier is a [`PaperLookup::NotFound`],
/// and unreadable partitions are skipped during the scan.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The search and lookup operations shared by the MCP tools and the CLI.
#[derive(Debug, Clone)]
pub struct ResearchService {
    store: Arc<dyn PaperStore>,
    index: Arc<dyn PaperIndex>,
}

impl ResearchService {
    pub fn new(store: Arc<dyn PaperStore>, index: Arc<dyn PaperIndex>) -> Self {
        Self { store, index }
    }

    /// Search the index for `topic` and merge the results into the topic's
    /// partition.
    ///
    /// Existing records for refetched identifiers are replaced with the fresh
    /// data; records for other identifiers are preserved. Returns the
    /// identifiers fetched by this call, in rank order.
    pub async fn search(
        &self,
        topic: &str,
        max_results: usize,
    ) -> Result<Vec<String>, ServiceError> {
        if topic.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "topic must not be empty".to_string(),
            ));
        }
        if max_results == 0 {
            return Err(ServiceError::InvalidRequest(
                "max_results must be positive".to_string(),
            ));
        }

        let query = IndexQuery::new(topic, max_results);
        let papers = self.index.search(&query).await?;

        let mut partition = self.store.load(topic);
        let mut fetched_ids = Vec::with_capacity(papers.len());
        for paper in papers {
            fetched_ids.push(paper.id.clone());
            partition.insert(paper.id, paper.record);
        }
        self.store.save(topic, &partition)?;

        tracing::info!(
            "Stored {} papers for topic '{}' ({} total in partition)",
            fetched_ids.len(),
            topic,
            partition.len()
        );
        Ok(fetched_ids)
    }

    /// Find a paper by identifier across every topic partition.
    ///
    /// When the identifier exists under several topics, the first partition
    /// the store enumeration visits wins; that order is not defined.
    pub fn lookup(&self, paper_id: &str) -> PaperLookup {
        for (topic, partition) in self.store.scan_all() {
            if let Some(record) = partition.get(paper_id) {
                return PaperLookup::Found {
                    topic,
                    record: record.clone(),
                };
            }
        }
        PaperLookup::NotFound
    }

    /// Enumerate stored partitions, for the CLI listing.
    pub fn topics(&self) -> Vec<(String, crate::models::TopicPartition)> {
        self.store.scan_all()
    }

    /// The store backing this service.
    pub fn store(&self) -> &Arc<dyn PaperStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::mock::{make_paper, MockIndex};
    use crate::index::IndexError;
    use crate::store::MemoryStore;

    fn service_with(index: MockIndex) -> ResearchService {
        ResearchService::new(Arc::new(MemoryStore::new()), Arc::new(index))
    }

    #[tokio::test]
    async fn test_search_rejects_empty_topic() {
        let service = service_with(MockIndex::new());
        let result = service.search("", 5).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_zero_max_results() {
        let service = service_with(MockIndex::new());
        let result = service.search("robotics", 0).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_search_returns_ids_in_rank_order() {
        let index = MockIndex::new();
        index.push_papers(vec![
            make_paper("2301.00002", "Second-ranked"),
            make_paper("2301.00001", "First-ranked"),
        ]);

        let service = service_with(index);
        let ids = service.search("machine learning", 5).await.unwrap();
        assert_eq!(ids, vec!["2301.00002", "2301.00001"]);
    }

    #[tokio::test]
    async fn test_index_error_propagates() {
        let index = MockIndex::new();
        index.push_error(IndexError::Api("boom".to_string()));

        let service = service_with(index);
        let result = service.search("robotics", 5).await;
        assert!(matches!(result, Err(ServiceError::Index(_))));
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let service = service_with(MockIndex::new());
        assert_eq!(service.lookup("9999.99999"), PaperLookup::NotFound);
    }
}
