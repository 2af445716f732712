// Document Analyzer
// Turns raw document text into an AnalysisReport: validate, segment, scan,
// optionally check the web, aggregate, and attach suggestions.

use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{AnalysisReport, AnalyzeOptions, AnalyzeRequest, DetailedReport};
use crate::services::text_processor::{extract_key_phrases, segment_sentences, word_count};
use crate::services::web_search::{SearchHit, SearchProvider};

use super::aggregation::{aggregate_score, flagged_count};
use super::sentence_scan::{analyze_against_external, analyze_internal};
use super::suggestions::generate_suggestions;

/// Input bounds re-checked here; the HTTP layer is not trusted to enforce them.
pub const MIN_TEXT_LENGTH: usize = 10;
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Key-phrase selection: candidates need this many words, the longest
/// KEY_PHRASE_CANDIDATES are kept, and at most MAX_SEARCH_PHRASES are
/// actually searched per document to stay under engine rate limits.
const KEY_PHRASE_MIN_WORDS: usize = 5;
const KEY_PHRASE_CANDIDATES: usize = 5;
const MAX_SEARCH_PHRASES: usize = 3;

const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    Validation(String),
}

/// Stateless per call; safe to share across concurrent callers.
pub struct DocumentAnalyzer {
    options: AnalyzeOptions,
    search_timeout: Duration,
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzeOptions::default())
    }
}

impl DocumentAnalyzer {
    pub fn new(options: AnalyzeOptions) -> Self {
        Self {
            options,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Run the full pipeline. Zero sentences after segmentation is a defined
    /// success case (score 0, original-band suggestions); a failing or absent
    /// search provider degrades to internal-only analysis. Only out-of-range
    /// input is an error.
    pub async fn build_report(
        &self,
        text: &str,
        provider: Option<&dyn SearchProvider>,
    ) -> Result<AnalysisReport, AnalysisError> {
        validate_input(text)?;

        let started = Instant::now();
        let sentences = segment_sentences(text, self.options.min_sentence_length);
        let mut analyses = analyze_internal(&sentences, self.options.plagiarism_threshold);

        let hits = match provider {
            Some(provider) if !sentences.is_empty() => {
                self.gather_web_hits(&sentences, provider).await
            }
            _ => Vec::new(),
        };
        analyze_against_external(&mut analyses, &hits, self.options.plagiarism_threshold);

        let score = aggregate_score(&analyses, self.options.length_factor_cap);
        let flagged = flagged_count(&analyses);
        let suggestions = generate_suggestions(score, flagged);

        let sources = distinct_sources(&hits);
        let flagged_sentences = analyses.iter().filter(|a| a.flagged).cloned().collect();

        info!(
            sentences = sentences.len(),
            flagged,
            score,
            web_hits = hits.len(),
            "analysis completed"
        );

        Ok(AnalysisReport {
            request_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            overall_plagiarism: score,
            text_length: text.chars().count(),
            word_count: word_count(text),
            sentence_count: sentences.len(),
            processing_time_ms: started.elapsed().as_millis(),
            detailed_report: DetailedReport {
                sentence_analysis: analyses,
                flagged_sentences,
                sources,
            },
            suggestions,
        })
    }

    /// One attempt per phrase, bounded by the search timeout. Lookup failures
    /// and timeouts are absorbed: the report is built from whatever came back.
    /// Hits whose snippet shares no words with the searched phrase cannot
    /// support a match and are dropped before the sentence scan.
    async fn gather_web_hits(
        &self,
        sentences: &[crate::models::SentenceFragment],
        provider: &dyn SearchProvider,
    ) -> Vec<SearchHit> {
        let phrases = extract_key_phrases(sentences, KEY_PHRASE_MIN_WORDS, KEY_PHRASE_CANDIDATES);
        let mut hits = Vec::new();

        for phrase in phrases.iter().take(MAX_SEARCH_PHRASES) {
            match tokio::time::timeout(self.search_timeout, provider.search_phrase(phrase)).await {
                Ok(Ok(phrase_hits)) => {
                    hits.extend(phrase_hits.into_iter().filter(|h| h.similarity > 0.0))
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "web search failed, continuing with internal analysis");
                }
                Err(_) => {
                    warn!(
                        timeout_ms = self.search_timeout.as_millis() as u64,
                        "web search timed out, continuing with internal analysis"
                    );
                }
            }
        }

        hits
    }
}

/// Entry point for callers holding a deserialized request. The provider is
/// only consulted when the request opts into web checking.
pub async fn analyze(
    request: &AnalyzeRequest,
    provider: Option<&dyn SearchProvider>,
) -> Result<AnalysisReport, AnalysisError> {
    let analyzer = DocumentAnalyzer::new(request.options.clone());
    let provider = if request.check_web { provider } else { None };
    analyzer.build_report(&request.text, provider).await
}

fn validate_input(text: &str) -> Result<(), AnalysisError> {
    let trimmed_len = text.trim().chars().count();
    if trimmed_len < MIN_TEXT_LENGTH {
        return Err(AnalysisError::Validation(format!(
            "text must be at least {} characters",
            MIN_TEXT_LENGTH
        )));
    }
    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(AnalysisError::Validation(format!(
            "text too long, maximum {} characters allowed",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Distinct hit URLs in first-seen order.
fn distinct_sources(hits: &[SearchHit]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    hits.iter()
        .filter(|h| seen.insert(h.url.clone()))
        .map(|h| h.url.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimilarityCategory;
    use crate::services::web_search::SearchError;
    use async_trait::async_trait;

    struct StaticProvider {
        hits: Vec<SearchHit>,
    }

    #[async_trait]
    impl SearchProvider for StaticProvider {
        async fn search_phrase(&self, _phrase: &str) -> Result<Vec<SearchHit>, SearchError> {
            Ok(self.hits.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl SearchProvider for FailingProvider {
        async fn search_phrase(&self, _phrase: &str) -> Result<Vec<SearchHit>, SearchError> {
            Err(SearchError::StatusError { status: 503 })
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl SearchProvider for SlowProvider {
        async fn search_phrase(&self, _phrase: &str) -> Result<Vec<SearchHit>, SearchError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![])
        }
    }

    fn hit(url: &str, snippet: &str) -> SearchHit {
        SearchHit {
            title: "title".to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
            search_phrase: String::new(),
            similarity: 0.5,
        }
    }

    #[tokio::test]
    async fn test_rejects_short_input() {
        let analyzer = DocumentAnalyzer::default();
        let err = analyzer.build_report("too short", None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rejects_oversized_input() {
        let analyzer = DocumentAnalyzer::default();
        let text = "word ".repeat(3000);
        let err = analyzer.build_report(&text, None).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[tokio::test]
    async fn test_repeated_sentence_scores_as_plagiarism() {
        // Scenario: the same twenty-word sentence four times over.
        let sentence = "the quick brown fox jumps over the lazy dog while the calm white cat \
                        watches from the old wooden fence";
        let text = format!("{s}. {s}. {s}. {s}.", s = sentence);

        let analyzer = DocumentAnalyzer::default();
        let report = analyzer.build_report(&text, None).await.unwrap();

        assert_eq!(report.sentence_count, 4);
        assert!(report.overall_plagiarism >= 70.0);
        let high = report
            .detailed_report
            .sentence_analysis
            .iter()
            .filter(|a| a.category == SimilarityCategory::High)
            .count();
        assert!(high >= 3);
        assert_eq!(report.detailed_report.flagged_sentences.len(), 3);
        assert!(report.suggestions.iter().any(|s| s.contains("need review")));
    }

    #[tokio::test]
    async fn test_distinct_sentences_score_low() {
        let text = "Bright stars shine over quiet mountains tonight. \
                    Fresh bread smells wonderful in the morning. \
                    Computers process numbers at incredible speeds. \
                    Gardens need regular watering during summer. \
                    History teaches patience through countless examples. \
                    Music connects people across every culture. \
                    Rivers carve valleys over thousands of years. \
                    Telescopes reveal galaxies beyond imagination. \
                    Chefs balance flavors with practiced precision. \
                    Libraries preserve knowledge for future readers.";

        let analyzer = DocumentAnalyzer::default();
        let report = analyzer.build_report(text, None).await.unwrap();

        assert_eq!(report.sentence_count, 10);
        // The edit-distance term keeps prose pairs above zero even with no
        // shared vocabulary, so the aggregate lands around 30, not at 0.
        assert!(report.overall_plagiarism > 0.0);
        assert!(report.overall_plagiarism < 40.0);
        assert_eq!(report.detailed_report.flagged_sentences.len(), 0);
    }

    #[tokio::test]
    async fn test_zero_sentences_is_a_defined_success() {
        // Every fragment is at or below the strict minimum sentence length.
        let analyzer = DocumentAnalyzer::new(AnalyzeOptions {
            min_sentence_length: 30,
            ..AnalyzeOptions::default()
        });
        let report = analyzer
            .build_report("Short bits. Tiny parts. Wee chunks.", None)
            .await
            .unwrap();

        assert_eq!(report.sentence_count, 0);
        assert_eq!(report.overall_plagiarism, 0.0);
        assert!(report.suggestions[0].starts_with("Excellent"));
    }

    #[tokio::test]
    async fn test_determinism_across_calls() {
        let text = "The cat sat on the mat. The dog ran in the park. The cat sat on the mat.";
        let analyzer = DocumentAnalyzer::default();
        let a = analyzer.build_report(text, None).await.unwrap();
        let b = analyzer.build_report(text, None).await.unwrap();

        assert_eq!(a.overall_plagiarism, b.overall_plagiarism);
        assert_eq!(
            serde_json::to_string(&a.detailed_report).unwrap(),
            serde_json::to_string(&b.detailed_report).unwrap()
        );
        assert_eq!(a.suggestions, b.suggestions);
    }

    #[tokio::test]
    async fn test_failing_provider_degrades_to_internal_only() {
        let text = "The moon orbits the earth every month. \
                    Tides follow the moon with remarkable regularity.";
        let analyzer = DocumentAnalyzer::default();
        let report = analyzer
            .build_report(text, Some(&FailingProvider))
            .await
            .unwrap();

        assert!(report.detailed_report.sources.is_empty());
        assert_eq!(report.sentence_count, 2);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_and_degrades() {
        let text = "The moon orbits the earth every month without fail. \
                    Completely different words fill this second sentence.";
        let analyzer =
            DocumentAnalyzer::default().with_search_timeout(Duration::from_millis(50));
        let report = analyzer
            .build_report(text, Some(&SlowProvider))
            .await
            .unwrap();

        assert!(report.detailed_report.sources.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_request_skips_provider_unless_opted_in() {
        let json = r#"{
            "text": "The moon orbits the earth every month. The moon orbits the earth every month.",
            "language": "en",
            "checkWeb": false,
            "options": { "plagiarismThreshold": 0.7 }
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(json).unwrap();

        // Provider would fail if consulted; checkWeb=false must bypass it.
        let report = analyze(&request, Some(&FailingProvider)).await.unwrap();
        assert_eq!(report.sentence_count, 2);
        assert!(report.detailed_report.sentence_analysis[1].flagged);
    }

    #[tokio::test]
    async fn test_zero_overlap_hits_are_discarded() {
        let text = "The moon orbits the earth every single month. \
                    Tides follow the moon with remarkable regularity.";
        let mut noise = hit("https://example.org/noise", "zebra quartz vortex");
        noise.similarity = 0.0;
        let provider = StaticProvider {
            hits: vec![
                noise,
                hit("https://example.org/astro", "The moon orbits the earth every single month"),
            ],
        };

        let analyzer = DocumentAnalyzer::default();
        let report = analyzer.build_report(text, Some(&provider)).await.unwrap();

        assert_eq!(report.detailed_report.sources, vec!["https://example.org/astro"]);
    }

    #[tokio::test]
    async fn test_web_hit_attributed_and_sources_collected() {
        let text = "The moon orbits the earth every single month. \
                    Nothing in this line resembles the first one.";
        let provider = StaticProvider {
            hits: vec![
                hit("https://example.org/astro", "The moon orbits the earth every single month"),
                hit("https://example.org/astro", "duplicate url entry"),
                hit("https://example.org/misc", "unrelated snippet entirely"),
            ],
        };

        let analyzer = DocumentAnalyzer::default();
        let report = analyzer.build_report(text, Some(&provider)).await.unwrap();

        assert_eq!(
            report.detailed_report.sources,
            vec!["https://example.org/astro", "https://example.org/misc"]
        );
        let first = &report.detailed_report.sentence_analysis[0];
        assert!(first.flagged);
        assert_eq!(
            first.source.as_ref().unwrap().reference,
            "https://example.org/astro"
        );
    }
}
