// Aggregation
// Folds per-sentence similarities into the document-level score.

use crate::models::SentenceAnalysis;

/// Mean per-sentence similarity (percent scale) scaled by a length factor
/// and clamped to [0, 100].
///
/// The length factor `clamp(sentence_count / 10, 1.0, cap)` nudges the score
/// up for long documents where sustained repetition is a stronger signal; it
/// never dampens short documents, so a four-sentence near-duplicate still
/// scores as plagiarism.
pub fn aggregate_score(analyses: &[SentenceAnalysis], length_factor_cap: f64) -> f64 {
    if analyses.is_empty() {
        return 0.0;
    }

    let mean: f64 =
        analyses.iter().map(|a| a.similarity).sum::<f64>() / analyses.len() as f64;

    let length_factor =
        (analyses.len() as f64 / 10.0).clamp(1.0, length_factor_cap.max(1.0));

    (mean * length_factor).clamp(0.0, 100.0)
}

/// Number of sentences whose similarity crossed the plagiarism threshold.
pub fn flagged_count(analyses: &[SentenceAnalysis]) -> usize {
    analyses.iter().filter(|a| a.flagged).count()
}
