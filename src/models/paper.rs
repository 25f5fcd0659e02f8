//! Paper metadata model matching the on-disk partition format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One topic's stored papers, keyed by paper identifier.
///
/// Serialized as a single JSON object per topic directory; inserting an
/// identifier that already exists replaces its record.
pub type TopicPartition = BTreeMap<String, PaperRecord>;

/// Metadata for one paper as stored in a topic partition.
///
/// The paper identifier is the partition key, not a record field, so the
/// serialized value carries exactly these five fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title
    pub title: String,

    /// Abstract text
    pub summary: String,

    /// Author names, in publication order
    pub authors: Vec<String>,

    /// Publication timestamp (ISO-8601)
    pub published: String,

    /// Direct PDF URL
    pub pdf_url: String,
}

impl PaperRecord {
    /// Render the record as an indented JSON document.
    ///
    /// Serializing this struct cannot fail; the fallback keeps the method
    /// infallible for callers that only want display text.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PaperRecord {
        PaperRecord {
            title: "Attention Is All You Need".to_string(),
            summary: "The dominant sequence transduction models...".to_string(),
            authors: vec!["Ashish Vaswani".to_string(), "Noam Shazeer".to_string()],
            published: "2017-06-12T17:57:34+00:00".to_string(),
            pdf_url: "https://arxiv.org/pdf/1706.03762.pdf".to_string(),
        }
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample();
        let json = serde_json::to_string(&record).unwrap();
        let back: PaperRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_on_disk_field_set() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["authors", "pdf_url", "published", "summary", "title"]
        );
    }

    #[test]
    fn test_partition_overwrites_by_id() {
        let mut partition = TopicPartition::new();
        partition.insert("1706.03762".to_string(), sample());

        let mut updated = sample();
        updated.summary = "Revised abstract".to_string();
        partition.insert("1706.03762".to_string(), updated.clone());

        assert_eq!(partition.len(), 1);
        assert_eq!(partition["1706.03762"], updated);
    }
}
