//! Tagged result for paper lookups across topic partitions.

use crate::models::PaperRecord;

/// Outcome of looking up a paper identifier across every topic partition.
///
/// Callers branch on the variant; only the tool and CLI boundaries turn it
/// into display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaperLookup {
    /// The identifier was found; `topic` is the partition it came from.
    ///
    /// When the same identifier exists under several topics, this is the
    /// first partition the store enumeration visited. That order is not
    /// defined.
    Found { topic: String, record: PaperRecord },

    /// No partition contains the identifier.
    NotFound,
}

impl PaperLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, PaperLookup::Found { .. })
    }

    /// Render the lookup outcome as the text returned to tool callers.
    pub fn render(&self, paper_id: &str) -> String {
        match self {
            PaperLookup::Found { record, .. } => record.to_pretty_json(),
            PaperLookup::NotFound => {
                format!("Paper with ID {paper_id} not found in any topic directory.")
            }
        }
    }
}
