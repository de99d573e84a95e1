//! Lexical normalization for frequency scoring.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens shorter than this are dropped.
pub const MIN_TOKEN_LEN: usize = 3;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

/// English function words: articles, conjunctions, prepositions, pronouns,
/// auxiliary and modal verbs.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "if", "while", "with", "without", "to", "from",
        "by", "for", "of", "on", "in", "into", "at", "over", "under", "above", "below", "is",
        "are", "was", "were", "be", "being", "been", "am", "do", "does", "did", "doing",
        "have", "has", "had", "having", "this", "that", "those", "these", "as", "it", "its",
        "their", "his", "her", "hers", "them", "they", "you", "your", "i", "me", "my", "we",
        "our", "us", "not", "no", "nor", "can", "could", "should", "would", "may", "might",
        "will", "shall", "must",
    ]
    .into_iter()
    .collect()
});

pub(crate) fn init() {
    Lazy::force(&WORD_RE);
    Lazy::force(&STOPWORDS);
}

/// Whether a lowercased word is a stopword.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lowercase, tokenize and filter a sentence into scoring words.
pub fn normalize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !is_stopword(t))
        .map(str::to_string)
        .collect()
}
