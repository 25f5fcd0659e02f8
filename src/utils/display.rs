//! Terminal rendering for CLI output.
//!
//! Table output is used when stdout is a terminal, JSON otherwise, so the
//! same commands compose into pipelines.

use chrono::DateTime;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use is_terminal::IsTerminal;

use crate::models::TopicPartition;

/// Whether stdout is attached to a terminal.
pub fn stdout_is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Truncate `text` to at most `max_chars` characters, appending an ellipsis
/// when truncation occurred.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

/// Shorten an ISO-8601 timestamp to its date part; timestamps that do not
/// parse are shown as-is.
fn published_date(published: &str) -> String {
    DateTime::parse_from_rfc3339(published)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| published.to_string())
}

/// Render one topic partition as a table.
pub fn partition_table(topic: &str, partition: &TopicPartition) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Authors", "Published"]);

    for (paper_id, record) in partition {
        table.add_row(vec![
            paper_id.clone(),
            truncate_with_ellipsis(&record.title, 60),
            truncate_with_ellipsis(&record.authors.join(", "), 40),
            published_date(&record.published),
        ]);
    }

    format!("Topic: {topic}\n{table}")
}

/// Render the stored topics and their record counts as a table.
pub fn topics_table(partitions: &[(String, TopicPartition)]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Topic", "Papers"]);

    for (topic, partition) in partitions {
        table.add_row(vec![topic.clone(), partition.len().to_string()]);
    }

    table.to_string()
}
