// Text Processing Service
// Normalization, sentence segmentation, and key-phrase selection.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A contiguous run of input text produced by segmentation. Immutable once
/// built; `position` is the ordinal within the parent document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceFragment {
    pub text: String,
    pub position: usize,
}

/// Normalize punctuation so smart quotes and odd whitespace do not skew the
/// character-level similarity measures.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.to_string();

    // Replace smart quotes
    s = s
        .replace('\u{201c}', "\"")
        .replace('\u{201d}', "\"")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'");

    // Replace em dash and non-breaking space
    s = s.replace('\u{2014}', "-").replace('\u{00a0}', " ");

    // Normalize line endings
    s = s.replace("\r\n", "\n").replace('\r', "\n");

    // Collapse horizontal whitespace
    let ws_re = Regex::new(r"[ \t\x0C\x0B]+").unwrap();
    s = ws_re.replace_all(&s, " ").to_string();

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Whitespace-delimited word count of the raw text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split on runs of sentence-terminal punctuation, trim, and keep fragments
/// longer than `min_len` chars. `min_len` 0 keeps every non-empty fragment;
/// stricter modes (e.g. 10) drop headings and stub fragments.
pub fn segment_sentences(text: &str, min_len: usize) -> Vec<SentenceFragment> {
    if text.is_empty() {
        return vec![];
    }

    let terminal_re = Regex::new(r"[.!?]+").unwrap();
    terminal_re
        .split(text)
        .map(|s| s.trim())
        .filter(|s| s.chars().count() > min_len)
        .enumerate()
        .map(|(position, s)| SentenceFragment {
            text: s.to_string(),
            position,
        })
        .collect()
}

/// Pick the sentences worth searching the web for: at least `min_words`
/// words, longest first, capped at `max_phrases`.
pub fn extract_key_phrases(
    sentences: &[SentenceFragment],
    min_words: usize,
    max_phrases: usize,
) -> Vec<String> {
    let mut candidates: Vec<&SentenceFragment> = sentences
        .iter()
        .filter(|s| word_count(&s.text) >= min_words)
        .collect();

    // Longest first; position breaks ties so selection stays deterministic.
    candidates.sort_by(|a, b| {
        b.text
            .chars()
            .count()
            .cmp(&a.text.chars().count())
            .then(a.position.cmp(&b.position))
    });

    candidates
        .into_iter()
        .take(max_phrases)
        .map(|s| s.text.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_punctuation() {
        let input = "Hello\u{201c}World\u{201d}";
        let output = normalize_punctuation(input);
        assert_eq!(output, "Hello\"World\"");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("the cat sat"), 3);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_segment_sentences_basic() {
        let text = "First sentence. Second one! Third one?";
        let sentences = segment_sentences(text, 0);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "First sentence");
        assert_eq!(sentences[1].text, "Second one");
        assert_eq!(sentences[2].position, 2);
    }

    #[test]
    fn test_segment_sentences_collapses_repeated_terminators() {
        let text = "Really?! Yes, absolutely!!";
        let sentences = segment_sentences(text, 0);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "Really");
        assert_eq!(sentences[1].text, "Yes, absolutely");
    }

    #[test]
    fn test_segment_sentences_min_length_filters_stubs() {
        let text = "Intro. This sentence is long enough to keep.";
        let basic = segment_sentences(text, 0);
        assert_eq!(basic.len(), 2);
        let strict = segment_sentences(text, 10);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].position, 0);
    }

    #[test]
    fn test_segment_sentences_empty_input() {
        assert!(segment_sentences("", 0).is_empty());
        assert!(segment_sentences("   ", 0).is_empty());
    }

    #[test]
    fn test_extract_key_phrases_prefers_longest() {
        let sentences = segment_sentences(
            "Short one here. This is a considerably longer sentence with many words in it. \
             Another sentence that also has enough words.",
            0,
        );
        let phrases = extract_key_phrases(&sentences, 5, 3);
        assert_eq!(phrases.len(), 2);
        assert!(phrases[0].starts_with("This is a considerably"));
    }

    #[test]
    fn test_extract_key_phrases_respects_cap() {
        let text = "one two three four five six. seven eight nine ten eleven twelve. \
                    alpha beta gamma delta epsilon zeta.";
        let sentences = segment_sentences(text, 0);
        let phrases = extract_key_phrases(&sentences, 5, 2);
        assert_eq!(phrases.len(), 2);
    }
}
