// Sentence Scan
// Per-sentence maximum-similarity search against earlier sentences and,
// optionally, against web search snippets.

use crate::models::{MatchKind, MatchSource, SentenceAnalysis, SentenceFragment, SimilarityCategory};
use crate::services::web_search::SearchHit;

use super::similarity::combined_similarity;

/// Round to two decimals on the percent scale, matching the report format.
pub(crate) fn as_percent(similarity: f64) -> f64 {
    (similarity * 10000.0).round() / 100.0
}

/// Scan sentences in document order. Each sentence keeps the maximum
/// similarity against strictly earlier sentences only, so a repeated sentence
/// is attributed to its first occurrence and the scan order is deterministic.
pub fn analyze_internal(
    sentences: &[SentenceFragment],
    plagiarism_threshold: f64,
) -> Vec<SentenceAnalysis> {
    let mut analyses = Vec::with_capacity(sentences.len());

    for (i, sentence) in sentences.iter().enumerate() {
        let mut max_similarity = 0.0_f64;
        let mut best_match: Option<usize> = None;

        for (j, earlier) in sentences.iter().enumerate().take(i) {
            let similarity = combined_similarity(&sentence.text, &earlier.text);
            if similarity > max_similarity {
                max_similarity = similarity;
                best_match = Some(j);
            }
        }

        let source = best_match.filter(|_| max_similarity > 0.0).map(|j| MatchSource {
            kind: MatchKind::Internal,
            reference: sentences[j].text.clone(),
            position: Some(sentences[j].position),
            similarity: as_percent(max_similarity),
        });

        analyses.push(SentenceAnalysis {
            sentence: sentence.text.clone(),
            position: sentence.position,
            similarity: as_percent(max_similarity),
            category: SimilarityCategory::from_similarity(max_similarity),
            flagged: max_similarity >= plagiarism_threshold,
            source,
        });
    }

    analyses
}

/// Augment an internal scan with web snippets. A web hit replaces the
/// recorded source only when it beats the internal maximum and crosses the
/// plagiarism threshold.
pub fn analyze_against_external(
    analyses: &mut [SentenceAnalysis],
    hits: &[SearchHit],
    plagiarism_threshold: f64,
) {
    if hits.is_empty() {
        return;
    }

    for analysis in analyses.iter_mut() {
        let mut best: Option<(&SearchHit, f64)> = None;

        for hit in hits {
            let similarity = combined_similarity(&analysis.sentence, &hit.snippet);
            if similarity * 100.0 <= analysis.similarity {
                continue;
            }
            if similarity < plagiarism_threshold {
                continue;
            }
            match best {
                Some((_, s)) if s >= similarity => {}
                _ => best = Some((hit, similarity)),
            }
        }

        if let Some((hit, similarity)) = best {
            analysis.similarity = as_percent(similarity);
            analysis.category = SimilarityCategory::from_similarity(similarity);
            analysis.flagged = true;
            analysis.source = Some(MatchSource {
                kind: MatchKind::Web,
                reference: hit.url.clone(),
                position: None,
                similarity: as_percent(similarity),
            });
        }
    }
}
