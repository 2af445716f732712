// Analysis Module
// Originality scoring core organized into specialized submodules:
// - similarity: blended string-similarity measures
// - sentence_scan: per-sentence maximum-similarity search, internal and web
// - aggregation: document-level score from per-sentence results
// - suggestions: canned remediation advice from the aggregate score
// - analyzer: validation and pipeline orchestration
// - comparison: pairwise whole-document similarity for batch checks

pub mod aggregation;
pub mod analyzer;
pub mod comparison;
pub mod sentence_scan;
pub mod similarity;
pub mod suggestions;

// Re-export commonly used functions
pub use aggregation::{aggregate_score, flagged_count};
pub use analyzer::{analyze, AnalysisError, DocumentAnalyzer, MAX_TEXT_LENGTH, MIN_TEXT_LENGTH};
pub use comparison::{compare_documents, SUSPICIOUS_THRESHOLD};
pub use sentence_scan::{analyze_against_external, analyze_internal};
pub use similarity::{
    combined_similarity, cosine_similarity, jaccard_similarity, levenshtein_distance,
    normalized_edit_similarity, tokenize,
};
pub use suggestions::generate_suggestions;
