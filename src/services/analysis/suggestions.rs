// Suggestions
// Maps the aggregate score to canned remediation advice.

/// Score bands on the [0, 100] scale. Fixed decision table; each band maps to
/// two or three remediation strings, plus a count note for flagged sentences.
const HIGH_BAND: f64 = 80.0;
const MODERATE_BAND: f64 = 50.0;
const LOW_BAND: f64 = 20.0;

pub fn generate_suggestions(score: f64, flagged_count: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = if score >= HIGH_BAND {
        vec![
            "High plagiarism detected. Consider rewriting large portions.".to_string(),
            "Cite your sources properly.".to_string(),
            "Paraphrase more effectively.".to_string(),
        ]
    } else if score >= MODERATE_BAND {
        vec![
            "Moderate plagiarism detected. Review flagged sentences.".to_string(),
            "Use more original content.".to_string(),
            "Add proper citations where needed.".to_string(),
        ]
    } else if score >= LOW_BAND {
        vec![
            "Minor similarities detected. Consider rewording some phrases.".to_string(),
            "Ensure proper quotation marks for direct quotes.".to_string(),
        ]
    } else {
        vec![
            "Excellent! Content appears to be mostly original.".to_string(),
            "Keep up the good work!".to_string(),
        ]
    };

    if flagged_count > 0 {
        suggestions.push(format!("{} sentences need review.", flagged_count));
    }

    suggestions
}
