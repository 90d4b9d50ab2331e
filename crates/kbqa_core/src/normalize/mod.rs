/// Lowercase and collapse every whitespace run to a single space.
///
/// Idempotent: `normalize_query(&normalize_query(x)) == normalize_query(x)`.
pub fn normalize_query(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased first `words` whitespace-separated words, space-joined.
/// Two excerpts with the same signature are treated as duplicates.
pub fn leading_words_signature(text: &str, words: usize) -> String {
    text.split_whitespace()
        .take(words)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
