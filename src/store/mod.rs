//! Topic-partitioned storage for paper metadata.
//!
//! Each search topic owns one partition: a JSON object mapping paper
//! identifiers to [`PaperRecord`](crate::models::PaperRecord)s. The
//! [`PaperStore`] trait hides where partitions live so the search and lookup
//! operations can run against the filesystem layout in production and an
//! in-memory map in tests.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::models::TopicPartition;

/// File name holding a topic's partition inside its directory.
pub const PARTITION_FILE: &str = "research_papers_info.json";

/// Normalize a search topic into its partition directory name.
///
/// Lowercases and replaces spaces with underscores, nothing more; the slug is
/// the only key linking a search query to its on-disk partition.
pub fn topic_slug(topic: &str) -> String {
    topic.to_lowercase().replace(' ', "_")
}

/// Errors surfaced by partition writes.
///
/// Reads never error: a missing or malformed partition is an empty one, and
/// enumeration skips partitions it cannot parse.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write partition for topic '{topic}': {source}")]
    Write {
        topic: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize partition for topic '{topic}': {source}")]
    Serialize {
        topic: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for topic partitions.
///
/// Whole partitions are the unit of read and write; there is no record-level
/// access and no locking, so the store is single-writer by contract.
pub trait PaperStore: Send + Sync + std::fmt::Debug {
    /// Load the partition for `topic`.
    ///
    /// A partition that does not exist, or whose file cannot be parsed, is
    /// returned as empty rather than as an error.
    fn load(&self, topic: &str) -> TopicPartition;

    /// Replace the partition for `topic` with `partition`, creating the
    /// topic's directory if it does not exist yet.
    fn save(&self, topic: &str, partition: &TopicPartition) -> Result<(), StoreError>;

    /// Enumerate every stored partition as `(topic_slug, partition)` pairs.
    ///
    /// Partitions that fail to parse are logged and skipped. The enumeration
    /// order follows the underlying listing and is not defined.
    fn scan_all(&self) -> Vec<(String, TopicPartition)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_slug() {
        assert_eq!(topic_slug("Machine Learning"), "machine_learning");
        assert_eq!(topic_slug("quantum computing"), "quantum_computing");
        assert_eq!(topic_slug("LLM"), "llm");
        assert_eq!(topic_slug("a  b"), "a__b");
    }
}
