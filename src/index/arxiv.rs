//! arXiv index client.

use async_trait::async_trait;
use feed_rs::parser;
use std::sync::Arc;

use crate::index::{IndexError, IndexQuery, IndexedPaper, PaperIndex};
use crate::models::PaperRecord;
use crate::utils::{api_retry_config, with_retry, HttpClient};

/// Base URL for the arXiv query API
const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
/// Base URL for arXiv PDFs
const ARXIV_PDF_URL: &str = "https://arxiv.org/pdf";
/// arXiv caps a single query at this many results
const ARXIV_MAX_RESULTS: usize = 200;

/// arXiv paper index
///
/// Issues relevance-ranked queries against the arXiv Atom API and normalizes
/// each feed entry into an [`IndexedPaper`].
#[derive(Debug, Clone)]
pub struct ArxivIndex {
    client: Arc<HttpClient>,
    api_url: String,
}

impl ArxivIndex {
    /// Create a new arXiv index client
    pub fn new() -> Self {
        Self {
            client: Arc::new(HttpClient::new()),
            api_url: ARXIV_API_URL.to_string(),
        }
    }

    /// Create with a custom HTTP client
    pub fn with_client(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            api_url: ARXIV_API_URL.to_string(),
        }
    }

    /// Point the client at a different API endpoint (used by tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Strip a trailing `vN` version suffix from an arXiv identifier.
    fn strip_version(id: &str) -> &str {
        match id.rsplit_once('v') {
            Some((base, suffix))
                if !base.is_empty()
                    && !suffix.is_empty()
                    && suffix.chars().all(|c| c.is_ascii_digit()) =>
            {
                base
            }
            _ => id,
        }
    }

    /// Extract the short arXiv identifier from an Atom entry id like
    /// `http://arxiv.org/abs/2301.12345v1`.
    fn short_id(entry_id: &str) -> Result<String, IndexError> {
        let raw = match entry_id.split_once("/abs/") {
            Some((_, rest)) => rest,
            None => entry_id,
        };
        let id = Self::strip_version(raw.trim());

        if id.is_empty() {
            return Err(IndexError::Parse(format!(
                "Missing paper ID in entry '{entry_id}'"
            )));
        }
        Ok(id.to_string())
    }

    /// Normalize one Atom feed entry into an indexed paper.
    fn parse_entry(entry: &feed_rs::model::Entry) -> Result<IndexedPaper, IndexError> {
        let id = Self::short_id(&entry.id)?;

        let title = entry
            .title
            .as_ref()
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();

        let summary = entry
            .summary
            .as_ref()
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default();

        let authors = entry
            .authors
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<_>>();

        let published = entry
            .published
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();

        let record = PaperRecord {
            title,
            summary,
            authors,
            published,
            pdf_url: format!("{ARXIV_PDF_URL}/{id}.pdf"),
        };

        Ok(IndexedPaper { id, record })
    }
}

impl Default for ArxivIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaperIndex for ArxivIndex {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    async fn search(&self, query: &IndexQuery) -> Result<Vec<IndexedPaper>, IndexError> {
        if query.topic.trim().is_empty() {
            return Err(IndexError::InvalidRequest("Empty search topic".to_string()));
        }

        let max_results = query.max_results.clamp(1, ARXIV_MAX_RESULTS);
        let search_query = format!("all:{}", query.topic);
        let url = format!(
            "{}?search_query={}&max_results={}&sortBy=relevance&sortOrder=descending",
            self.api_url,
            urlencoding::encode(&search_query),
            max_results,
        );

        let client = Arc::clone(&self.client);
        let url_for_retry = url.clone();

        let feed = with_retry(api_retry_config(), || {
            let client = Arc::clone(&client);
            let url = url_for_retry.clone();
            async move {
                let response = client
                    .get(&url)
                    .header("Accept", "application/atom+xml")
                    .send()
                    .await
                    .map_err(|e| {
                        IndexError::Network(format!("Failed to fetch arXiv results: {e}"))
                    })?;

                if !response.status().is_success() {
                    return Err(IndexError::Api(format!(
                        "arXiv API returned status: {}",
                        response.status()
                    )));
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| IndexError::Network(format!("Failed to read response: {e}")))?;

                parser::parse(bytes.as_ref())
                    .map_err(|e| IndexError::Parse(format!("Failed to parse Atom feed: {e}")))
            }
        })
        .await?;

        let papers: Result<Vec<IndexedPaper>, IndexError> =
            feed.entries.iter().map(Self::parse_entry).collect();
        let mut papers = papers?;
        papers.truncate(max_results);

        tracing::debug!(
            "arXiv returned {} papers for '{}'",
            papers.len(),
            query.topic
        );
        Ok(papers)
    }
}
