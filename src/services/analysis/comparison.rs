// Document Comparison
// Pairwise whole-document similarity for batch checks: every unordered pair
// of submitted documents is scored with the blended measure and banded as
// suspicious or ok.

use crate::models::{ComparisonStatus, DocumentComparison};

use super::sentence_scan::as_percent;
use super::similarity::combined_similarity;

/// Pairs at or above this similarity are marked suspicious by default.
pub const SUSPICIOUS_THRESHOLD: f64 = 0.70;

/// Compare every unordered pair of documents. Pairs are emitted in scan
/// order (`a < b`), so the output is deterministic for a given input order.
/// Fewer than two documents yields no pairs.
pub fn compare_documents(
    documents: &[String],
    suspicious_threshold: f64,
) -> Vec<DocumentComparison> {
    let mut comparisons = Vec::new();

    for a in 0..documents.len() {
        for b in (a + 1)..documents.len() {
            let similarity = combined_similarity(&documents[a], &documents[b]);
            comparisons.push(DocumentComparison {
                document_a: a,
                document_b: b,
                similarity: as_percent(similarity),
                status: if similarity >= suspicious_threshold {
                    ComparisonStatus::Suspicious
                } else {
                    ComparisonStatus::Ok
                },
            });
        }
    }

    comparisons
}
