//! Text normalization shared by the embedder and the phrase aligner

/// Drop every char that is neither alphanumeric nor whitespace
///
/// `"Ørnevej, 45."` becomes `"Ørnevej 45"`. Superscript digits such as the
/// `²` in `m²` count as numeric and are kept.
pub fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Lowercase, punctuation-free form of a single token
pub fn normalize_token(token: &str) -> String {
    strip_punctuation(token).to_lowercase()
}

/// Lowercase, punctuation-free words of `s`, with tokens that were pure
/// punctuation removed
pub fn normalized_words(s: &str) -> Vec<String> {
    s.split_whitespace()
        .map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect()
}
