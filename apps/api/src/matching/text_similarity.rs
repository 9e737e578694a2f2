//! Term-weighted similarity between two free-text blobs.
//!
//! TF-IDF over a corpus of exactly the two compared documents. The summed
//! term products are normalized by `|terms| × 0.5` and clamped, which is not
//! a cosine similarity. Component weights and recommendation thresholds are
//! calibrated against this exact shape.

use std::collections::{BTreeSet, HashMap};

const CORPUS_SIZE: f64 = 2.0;
const NORMALIZATION_FACTOR: f64 = 0.5;

/// Terms dropped from the per-document frequency profiles.
/// They still count towards `|terms|` in the normalization.
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "am", "an", "and", "another", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "came", "can", "cannot", "come", "could", "did", "do", "does", "doing",
    "during", "each", "few", "for", "from", "further", "get", "got", "has", "had", "he",
    "have", "her", "here", "him", "himself", "his", "how", "if", "in", "into", "is", "it",
    "its", "itself", "like", "make", "many", "me", "might", "more", "most", "much", "must",
    "my", "myself", "never", "now", "of", "on", "only", "or", "other", "our", "ours",
    "ourselves", "out", "over", "own", "said", "same", "see", "should", "since", "so", "some",
    "still", "such", "take", "than", "that", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "way", "we", "well", "were", "what", "where", "when",
    "which", "while", "who", "whom", "with", "would", "why", "you", "your", "yours",
    "yourself", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o",
    "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "0", "1", "2", "3", "4", "5", "6",
    "7", "8", "9", "_",
];

/// Word characters: ASCII letters and digits, basic Cyrillic (`А-Я`, `а-я`) and `_`.
/// Accented and other non-Latin letters act as separators.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('А'..='я').contains(&c)
}

/// Lower-cases and splits on anything that is not a word character.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn term_frequencies(tokens: &[String]) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for token in tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !STOPWORDS.contains(t))
    {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

fn inverse_document_frequency(documents_with_term: u32) -> f64 {
    1.0 + (CORPUS_SIZE / (1.0 + f64::from(documents_with_term))).ln()
}

/// Similarity of two texts on a 0–100 scale. 0 when either side has no tokens.
pub fn text_similarity(left: &str, right: &str) -> f64 {
    let left_tokens = tokenize(left);
    let right_tokens = tokenize(right);
    if left_tokens.is_empty() || right_tokens.is_empty() {
        return 0.0;
    }

    let left_tf = term_frequencies(&left_tokens);
    let right_tf = term_frequencies(&right_tokens);

    // Ordered so the floating-point sum is identical across runs.
    let terms: BTreeSet<&str> = left_tokens
        .iter()
        .chain(right_tokens.iter())
        .map(String::as_str)
        .collect();

    let raw: f64 = terms
        .iter()
        .map(|term| {
            let l = left_tf.get(term).copied().unwrap_or(0.0);
            let r = right_tf.get(term).copied().unwrap_or(0.0);
            let df = u32::from(l > 0.0) + u32::from(r > 0.0);
            let idf = inverse_document_frequency(df);
            (l * idf) * (r * idf)
        })
        .sum();

    let normalized = raw / (terms.len() as f64 * NORMALIZATION_FACTOR);
    normalized.clamp(0.0, 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_term_weight() -> f64 {
        let idf = 1.0 + (2.0_f64 / 3.0).ln();
        idf * idf
    }

    #[test]
    fn test_tokenize_lowercases_and_splits_punctuation() {
        assert_eq!(
            tokenize("Senior Go/Kubernetes engineer, CI_CD!"),
            vec!["senior", "go", "kubernetes", "engineer", "ci_cd"]
        );
    }

    #[test]
    fn test_tokenize_word_character_class() {
        assert_eq!(tokenize("Café naïve"), vec!["caf", "na", "ve"]);
        assert_eq!(tokenize("Разработчик Rust"), vec!["разработчик", "rust"]);
        assert_eq!(tokenize("ёлка"), vec!["лка"]);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(text_similarity("", "rust engineer"), 0.0);
        assert_eq!(text_similarity("rust engineer", "  ...  "), 0.0);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        assert_eq!(text_similarity("rust compiler", "python notebooks"), 0.0);
    }

    #[test]
    fn test_identical_texts_follow_normalization_rule() {
        // Two shared terms, each tf=1 in both documents:
        // sum = 2 × idf², normalized by 2 × 0.5.
        let score = text_similarity("rust engineer", "Rust Engineer");
        let expected = 2.0 * shared_term_weight() / (2.0 * 0.5) * 100.0;
        assert!((score - expected).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_repeated_shared_terms_clamp_to_100() {
        let score = text_similarity("rust rust rust", "rust rust rust");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_stopwords_do_not_contribute_but_count_as_terms() {
        // Only "rust" contributes; "the" is in the term set but has tf=0.
        let score = text_similarity("the rust", "the rust");
        let expected = shared_term_weight() / (2.0 * 0.5) * 100.0;
        assert!((score - expected).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_score_is_deterministic() {
        let a = "Backend engineer building distributed payment systems in Go and Kubernetes";
        let b = "Engineer who built payment APIs in Go, deployed on Kubernetes clusters";
        let first = text_similarity(a, b);
        for _ in 0..10 {
            assert_eq!(text_similarity(a, b), first);
        }
        assert!((0.0..=100.0).contains(&first));
    }
}
