//! Text normalization for indexing and querying.
//!
//! The pipeline order matters — vocabulary matching depends on it:
//! lowercase, strip ASCII punctuation, tokenize on whitespace, then drop
//! stopwords and tokens of length ≤ 2. No stemming. The same fixed stopword
//! table is applied again by the vectorizer's own tokenizer, so a stray
//! stopword can never reach the vocabulary.

/// Fixed English stopword table shared by the normalizer and the vectorizer.
///
/// Tokens of length ≤ 2 are dropped before this table is consulted, so the
/// short function words ("a", "an", "of", …) appear here only for
/// completeness.
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "did", "didn", "do", "does", "doesn", "doing", "don",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has", "hasn",
    "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his",
    "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "ma", "me",
    "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not", "now", "o",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "re", "s", "same", "shan", "she", "should", "shouldn", "so", "some", "such", "t",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "ve", "very", "was",
    "wasn", "we", "were", "weren", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "won", "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
];

/// Minimum token length kept after normalization.
const MIN_TOKEN_LEN: usize = 3;

/// Normalize arbitrary text into a space-joined token sequence.
///
/// Deterministic and side-effect-free; never fails. Empty or all-stopword
/// input yields the empty string.
#[must_use]
pub fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

/// Normalized tokens of `text`, in order of appearance.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|ch| !ch.is_ascii_punctuation())
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| is_index_token(token))
        .map(ToOwned::to_owned)
        .collect()
}

/// Whether a lowercased token survives the stopword and length filters.
#[must_use]
pub fn is_index_token(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LEN && !STOPWORDS.contains(&token)
}
