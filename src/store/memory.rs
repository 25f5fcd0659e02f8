//! In-memory paper store for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::models::TopicPartition;
use crate::store::{topic_slug, PaperStore, StoreError};

/// Paper store holding partitions in a process-local map.
///
/// Mirrors the filesystem store's contract, including keying partitions by
/// topic slug, so tests can swap it in without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    partitions: Mutex<BTreeMap<String, TopicPartition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored partitions.
    pub fn partition_count(&self) -> usize {
        self.partitions.lock().unwrap().len()
    }
}

impl PaperStore for MemoryStore {
    fn load(&self, topic: &str) -> TopicPartition {
        self.partitions
            .lock()
            .unwrap()
            .get(&topic_slug(topic))
            .cloned()
            .unwrap_or_default()
    }

    fn save(&self, topic: &str, partition: &TopicPartition) -> Result<(), StoreError> {
        self.partitions
            .lock()
            .unwrap()
            .insert(topic_slug(topic), partition.clone());
        Ok(())
    }

    fn scan_all(&self) -> Vec<(String, TopicPartition)> {
        self.partitions
            .lock()
            .unwrap()
            .iter()
            .map(|(topic, partition)| (topic.clone(), partition.clone()))
            .collect()
    }
}
