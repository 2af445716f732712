// Data Models
// Request, report, and option types exchanged with callers.

use serde::{Deserialize, Serialize};

pub use crate::services::text_processor::SentenceFragment;

// ============ Analysis Request ============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    pub language: Option<String>,
    #[serde(default)]
    pub check_web: bool,
    #[serde(default)]
    pub options: AnalyzeOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOptions {
    /// Fragments at or below this char count are dropped during segmentation.
    #[serde(default)]
    pub min_sentence_length: usize,
    /// A sentence whose similarity crosses this is flagged.
    #[serde(default = "default_plagiarism_threshold")]
    pub plagiarism_threshold: f64,
    /// Scales the aggregate score by sentence count; see `aggregate_score`.
    #[serde(default = "default_length_factor_cap")]
    pub length_factor_cap: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            min_sentence_length: 0,
            plagiarism_threshold: 0.70,
            length_factor_cap: 1.2,
        }
    }
}

// ============ Sentence Analysis ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityCategory {
    Low,
    Medium,
    High,
}

impl SimilarityCategory {
    /// Thresholds on the [0,1] similarity scale: >= 0.70 high, >= 0.40 medium.
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= 0.70 {
            Self::High
        } else if similarity >= 0.40 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Internal,
    Web,
}

/// Where a sentence's best match came from: an earlier sentence in the same
/// document, or a web snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSource {
    pub kind: MatchKind,
    /// Matched sentence text for internal matches, URL for web matches.
    pub reference: String,
    /// Position of the matched sentence; absent for web matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Similarity against the matched fragment, percent scale.
    pub similarity: f64,
}

/// One entry per input sentence. `similarity` is the maximum observed against
/// strictly earlier sentences plus any external snippet checked, percent scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceAnalysis {
    pub sentence: String,
    pub position: usize,
    pub similarity: f64,
    pub category: SimilarityCategory,
    pub flagged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<MatchSource>,
}

// ============ Document Comparison ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonStatus {
    Suspicious,
    Ok,
}

/// One pair from a batch comparison. Indices refer to the input slice;
/// `document_a < document_b` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentComparison {
    pub document_a: usize,
    pub document_b: usize,
    /// Blended whole-document similarity, percent scale.
    pub similarity: f64,
    pub status: ComparisonStatus,
}

// ============ Analysis Report ============

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReport {
    pub sentence_analysis: Vec<SentenceAnalysis>,
    pub flagged_sentences: Vec<SentenceAnalysis>,
    pub sources: Vec<String>,
}

/// Document-level result. Created once per analysis call, never mutated,
/// fully serializable so any exporter can consume it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub request_id: String,
    pub timestamp: String,
    pub overall_plagiarism: f64,
    pub text_length: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub processing_time_ms: u128,
    pub detailed_report: DetailedReport,
    pub suggestions: Vec<String>,
}

// ============ Default Value Functions ============

fn default_plagiarism_threshold() -> f64 {
    0.70
}
fn default_length_factor_cap() -> f64 {
    1.2
}
