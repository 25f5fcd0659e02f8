//! Filesystem-backed paper store.
//!
//! Layout under the store root:
//!
//! ```text
//! research_papers/
//!   machine_learning/
//!     research_papers_info.json
//!   robotics/
//!     research_papers_info.json
//! ```
//!
//! Each partition file is one pretty-printed JSON object keyed by paper
//! identifier.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::TopicPartition;
use crate::store::{topic_slug, PaperStore, StoreError, PARTITION_FILE};

/// Paper store rooted at a directory, one subdirectory per topic.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the partition file for `topic`.
    pub fn partition_path(&self, topic: &str) -> PathBuf {
        self.root.join(topic_slug(topic)).join(PARTITION_FILE)
    }

    fn read_partition_file(path: &Path) -> Result<TopicPartition, std::io::Error> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

impl PaperStore for FsStore {
    fn load(&self, topic: &str) -> TopicPartition {
        let path = self.partition_path(topic);
        match Self::read_partition_file(&path) {
            Ok(partition) => partition,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        "Treating unreadable partition {} as empty: {}",
                        path.display(),
                        e
                    );
                }
                TopicPartition::new()
            }
        }
    }

    fn save(&self, topic: &str, partition: &TopicPartition) -> Result<(), StoreError> {
        let path = self.partition_path(topic);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Write {
                topic: topic.to_string(),
                source,
            })?;
        }

        let content =
            serde_json::to_string_pretty(partition).map_err(|source| StoreError::Serialize {
                topic: topic.to_string(),
                source,
            })?;

        fs::write(&path, content).map_err(|source| StoreError::Write {
            topic: topic.to_string(),
            source,
        })?;

        tracing::debug!(
            "Saved {} records to {}",
            partition.len(),
            path.display()
        );
        Ok(())
    }

    fn scan_all(&self) -> Vec<(String, TopicPartition)> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut partitions = Vec::new();
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }

            let file = dir.join(PARTITION_FILE);
            if !file.is_file() {
                continue;
            }

            match Self::read_partition_file(&file) {
                Ok(partition) => {
                    let topic = entry.file_name().to_string_lossy().into_owned();
                    partitions.push((topic, partition));
                }
                Err(e) => {
                    tracing::warn!("Skipping unparseable partition {}: {}", file.display(), e);
                }
            }
        }

        partitions
    }
}
