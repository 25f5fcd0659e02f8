//! Mock index for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::index::{IndexError, IndexQuery, IndexedPaper, PaperIndex};
use crate::models::PaperRecord;

/// A mock paper index that returns queued responses.
///
/// Each queued item is consumed by one search call; an empty queue yields an
/// empty result set. Queued errors let tests inject upstream failures
/// deterministically.
#[derive(Debug, Default)]
pub struct MockIndex {
    responses: Mutex<VecDeque<Result<Vec<IndexedPaper>, IndexError>>>,
}

impl MockIndex {
    /// Create a new mock index with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful search response.
    pub fn push_papers(&self, papers: Vec<IndexedPaper>) {
        self.responses.lock().unwrap().push_back(Ok(papers));
    }

    /// Queue a failed search response.
    pub fn push_error(&self, error: IndexError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }
}

#[async_trait]
impl PaperIndex for MockIndex {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Index"
    }

    async fn search(&self, query: &IndexQuery) -> Result<Vec<IndexedPaper>, IndexError> {
        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response.map(|mut papers| {
                papers.truncate(query.max_results);
                papers
            }),
            None => Ok(Vec::new()),
        }
    }
}


/// Helper to build an indexed paper for tests.
pub fn make_paper(id: &str, title: &str) -> IndexedPaper {
    IndexedPaper {
        id: id.to_string(),
        record: PaperRecord {
            title: title.to_string(),
            summary: format!("{title} abstract"),
            authors: vec!["Test Author".to_string()],
            published: "2023-01-15T10:00:00+00:00".to_string(),
            pdf_url: format!("https://arxiv.org/pdf/{id}.pdf"),
        },
    }
}
