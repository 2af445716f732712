// Similarity Engine
// Blends several string-comparison measures into one score in [0, 1].

use std::collections::{HashMap, HashSet};

/// Weight of token-set overlap (Jaccard) in the blended score.
pub const LEXICAL_OVERLAP_WEIGHT: f64 = 0.4;
/// Weight of term-frequency cosine similarity in the blended score.
pub const DISTRIBUTIONAL_WEIGHT: f64 = 0.4;
/// Weight of normalized edit similarity in the blended score.
/// Minority signal: breaks ties for near-duplicate phrasing where the
/// set-based measures saturate.
pub const CHARACTER_ORDER_WEIGHT: f64 = 0.2;

/// Lowercase, strip non-alphanumerics, split on whitespace, drop empties.
pub fn tokenize(fragment: &str) -> Vec<String> {
    fragment
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Token-set intersection over union. Two empty token sets compare as 0
/// (avoids division by zero; an empty fragment matches nothing).
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = tokenize(a).into_iter().collect();
    let set_b: HashSet<String> = tokenize(b).into_iter().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}

/// Cosine of the angle between term-frequency vectors built over the union
/// vocabulary of both fragments. 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let freq_a = term_frequencies(a);
    let freq_b = term_frequencies(b);

    let mut dot = 0.0;
    for (term, count_a) in &freq_a {
        if let Some(count_b) = freq_b.get(term) {
            dot += (*count_a as f64) * (*count_b as f64);
        }
    }

    let mag_a = magnitude(&freq_a);
    let mag_b = magnitude(&freq_b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    (dot / (mag_a * mag_b)).clamp(0.0, 1.0)
}

fn term_frequencies(fragment: &str) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for token in tokenize(fragment) {
        *freq.entry(token).or_insert(0) += 1;
    }
    freq
}

fn magnitude(freq: &HashMap<String, usize>) -> f64 {
    freq.values()
        .map(|&c| (c as f64) * (c as f64))
        .sum::<f64>()
        .sqrt()
}

/// Levenshtein distance over chars (insert / delete / substitute, unit cost).
/// Two-row dynamic program; distance is bounded by the longer fragment.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Edit distance normalized by the longer raw string: `1 - d / max_len`.
/// Two empty strings are identical, so this returns 1.
pub fn normalized_edit_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / max_len as f64
}

/// Fixed weighted blend of the three measures. Symmetric, deterministic,
/// and total over any pair of strings including empty ones.
pub fn combined_similarity(a: &str, b: &str) -> f64 {
    let score = jaccard_similarity(a, b) * LEXICAL_OVERLAP_WEIGHT
        + cosine_similarity(a, b) * DISTRIBUTIONAL_WEIGHT
        + normalized_edit_similarity(a, b) * CHARACTER_ORDER_WEIGHT;
    score.clamp(0.0, 1.0)
}
