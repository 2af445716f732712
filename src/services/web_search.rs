// Web Search Service
// Searches the open web for phrases lifted from the document under analysis.
// Implementations sit behind `SearchProvider` so the analyzer never depends
// on a particular engine; failures degrade to empty results upstream.

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const DUCKDUCKGO_DEFAULT_URL: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// At most this many hits are kept per searched phrase.
pub const MAX_RESULTS_PER_PHRASE: usize = 5;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("search engine returned status {status}")]
    StatusError { status: u16 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub search_phrase: String,
    /// Word-overlap similarity between the searched phrase and the snippet.
    /// The analyzer drops hits where this is zero before the sentence scan;
    /// the per-sentence score is recomputed with the blended measure.
    pub similarity: f64,
}

/// The external-source lookup seam. Implementations are expected to be
/// rate-limited by the caller (phrases per document are capped upstream).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_phrase(&self, phrase: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Fraction of the phrase's distinct words that also occur in the snippet.
pub fn word_overlap_similarity(phrase: &str, snippet: &str) -> f64 {
    let phrase_words: HashSet<String> = split_words(phrase);
    if phrase_words.is_empty() {
        return 0.0;
    }
    let snippet_words: HashSet<String> = split_words(snippet);
    let overlap = phrase_words.intersection(&snippet_words).count();
    overlap as f64 / phrase_words.len() as f64
}

fn split_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

/// Scrapes the DuckDuckGo HTML endpoint (no API key required).
pub struct DuckDuckGoClient {
    client: Client,
    base_url: String,
}

impl Default for DuckDuckGoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        let base_url =
            env::var("VERITEXT_SEARCH_URL").unwrap_or_else(|_| DUCKDUCKGO_DEFAULT_URL.to_string());

        Self { client, base_url }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    async fn search_phrase(&self, phrase: &str) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", phrase)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "search request rejected");
            return Err(SearchError::StatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let hits = parse_result_page(&body, phrase, MAX_RESULTS_PER_PHRASE);
        debug!(phrase_len = phrase.len(), hits = hits.len(), "search completed");
        Ok(hits)
    }
}

/// Pull title / url / snippet triples out of a DuckDuckGo HTML results page.
/// Markup-tolerant but deliberately simple; anything it cannot read is
/// dropped rather than guessed at.
pub(crate) fn parse_result_page(html: &str, phrase: &str, max_results: usize) -> Vec<SearchHit> {
    let title_re =
        Regex::new(r#"(?s)class="result__a"[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).unwrap();
    let snippet_re = Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#).unwrap();

    let titles: Vec<(String, String)> = title_re
        .captures_iter(html)
        .map(|c| (c[1].to_string(), strip_tags(&c[2])))
        .collect();
    let snippets: Vec<String> = snippet_re
        .captures_iter(html)
        .map(|c| strip_tags(&c[1]))
        .collect();

    titles
        .into_iter()
        .zip(snippets)
        .filter(|((url, title), snippet)| {
            !url.is_empty() && !title.is_empty() && !snippet.is_empty()
        })
        .take(max_results)
        .map(|((url, title), snippet)| {
            let similarity = word_overlap_similarity(phrase, &snippet);
            SearchHit {
                title,
                url,
                snippet,
                search_phrase: phrase.to_string(),
                similarity,
            }
        })
        .collect()
}

fn strip_tags(fragment: &str) -> String {
    let tag_re = Regex::new(r"<[^>]*>").unwrap();
    tag_re.replace_all(fragment, "").trim().to_string()
}
