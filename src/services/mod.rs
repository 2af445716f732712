// Core Services

pub mod analysis;
pub mod config_store;
pub mod text_processor;
pub mod web_search;

pub use config_store::*;
pub use text_processor::*;
pub use web_search::*;

// Re-export analysis module functions
pub use analysis::{
    aggregate_score,
    analyze,
    analyze_against_external,
    analyze_internal,
    combined_similarity,
    compare_documents,
    cosine_similarity,
    flagged_count,
    generate_suggestions,
    jaccard_similarity,
    normalized_edit_similarity,
    tokenize,
    AnalysisError,
    DocumentAnalyzer,
};
