//! Core data structures shared across the store, index, and tool layers.

mod lookup;
mod paper;

pub use lookup::PaperLookup;
pub use paper::{PaperRecord, TopicPartition};
