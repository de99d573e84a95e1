//! Frequency-based extractive summarization.
//!
//! Sentences are scored by the mean document frequency of their content words,
//! with a small bonus for sentences near the start of the document, where
//! contracts usually name the parties and defined terms.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::normalize::normalize;
use crate::segment::sentences;

/// Sentence count used when the caller does not ask for one.
pub const DEFAULT_MAX_SENTENCES: usize = 8;

/// Keeps token-less sentences from dividing by zero.
const EPSILON: f64 = 1e-6;

/// Largest multiplicative bonus, given to the first sentence.
const POSITION_BONUS: f64 = 0.1;

/// Build the token → occurrence count table for a document.
pub fn frequency_table(token_sets: &[Vec<String>]) -> HashMap<&str, usize> {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for tokens in token_sets {
        for token in tokens {
            *freq.entry(token.as_str()).or_insert(0) += 1;
        }
    }
    freq
}

/// Score every sentence. `scores[i]` belongs to sentence `i`.
pub fn score_sentences(token_sets: &[Vec<String>], freq: &HashMap<&str, usize>) -> Vec<f64> {
    let total = token_sets.len();
    let decay = f64::max(1.0, total as f64 / 10.0);

    token_sets
        .iter()
        .enumerate()
        .map(|(i, tokens)| {
            let sum: usize = tokens
                .iter()
                .map(|t| freq.get(t.as_str()).copied().unwrap_or(0))
                .sum();
            let base = sum as f64 / (tokens.len() as f64 + EPSILON);
            base * (1.0 + POSITION_BONUS * (-(i as f64) / decay).exp())
        })
        .collect()
}

/// Pick the indices of the `k` best-scoring sentences, in document order.
///
/// Equal scores go to the earlier sentence.
pub fn select_top(scores: &[f64], k: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    ranked.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    ranked.truncate(k);
    ranked.sort_unstable();
    ranked
}

/// Summarize `text` with at most `max_sentences` of its own sentences.
///
/// Returns the chosen sentences verbatim, in document order, joined by single
/// spaces. Empty text yields an empty string.
pub fn extractive_summary(text: &str, max_sentences: usize) -> String {
    let sentences = sentences(text);
    if sentences.is_empty() {
        return String::new();
    }

    let token_sets: Vec<Vec<String>> = sentences.iter().map(|s| normalize(s.text)).collect();
    let freq = frequency_table(&token_sets);

    if freq.is_empty() {
        debug!("No content words in {} sentences, using lead sentences", sentences.len());
        return sentences
            .iter()
            .take(max_sentences)
            .map(|s| s.text)
            .collect::<Vec<_>>()
            .join(" ");
    }

    let scores = score_sentences(&token_sets, &freq);
    let selected = select_top(&scores, max_sentences);

    debug!(
        "Selected {} of {} sentences ({} distinct terms)",
        selected.len(),
        sentences.len(),
        freq.len()
    );

    selected
        .into_iter()
        .map(|i| sentences[i].text)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::split_sentences;

    const CONTRACT: &str = "This Services Agreement is made between Acme and Beta. \
        Acme shall provide consulting services to Beta. \
        Beta shall pay Acme a monthly fee for the services. \
        The weather was pleasant when the parties met. \
        Either party may terminate the services on thirty days notice. \
        Lunch was served afterwards.";

    fn sentence_count(summary: &str, text: &str) -> usize {
        split_sentences(text)
            .into_iter()
            .filter(|s| summary.contains(s))
            .count()
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extractive_summary("", 5), "");
        assert_eq!(extractive_summary("   ", 3), "");
    }

    #[test]
    fn test_respects_sentence_limit() {
        let summary = extractive_summary(CONTRACT, 3);
        let picked: Vec<&str> = split_sentences(CONTRACT)
            .into_iter()
            .filter(|s| summary.contains(s))
            .collect();
        assert_eq!(picked.len(), 3);
        assert_eq!(summary, picked.join(" "));
    }

    #[test]
    fn test_prefers_central_sentences() {
        let summary = extractive_summary(CONTRACT, 3);
        assert!(summary.contains("Beta shall pay Acme a monthly fee for the services."));
        assert!(!summary.contains("Lunch was served afterwards."));
    }

    #[test]
    fn test_short_document_returns_everything_in_order() {
        let text = "The Licensor grants a license. The Licensee pays royalties.";
        assert_eq!(extractive_summary(text, 8), text);
        assert_eq!(sentence_count(&extractive_summary(text, 20), text), 2);
    }

    #[test]
    fn test_no_content_words_falls_back_to_lead() {
        let text = "It is. So be it. Go on.";
        assert_eq!(extractive_summary(text, 2), "It is. So be it.");
    }

    #[test]
    fn test_equal_scores_keep_earlier_sentence() {
        // "It is." and "So be it." both score zero; only one fits.
        let text = "Payment obligations apply. It is. So be it. Payment obligations apply.";
        assert_eq!(
            extractive_summary(text, 3),
            "Payment obligations apply. It is. Payment obligations apply."
        );
    }

    #[test]
    fn test_select_top_tie_break() {
        assert_eq!(select_top(&[1.0, 2.0, 2.0, 0.5], 2), vec![1, 2]);
        assert_eq!(select_top(&[0.0, 0.0, 0.0], 2), vec![0, 1]);
        assert_eq!(select_top(&[3.0, 1.0], 0), Vec::<usize>::new());
    }

    #[test]
    fn test_position_bonus_is_capped() {
        let token_sets = vec![vec!["fee".to_string()], vec!["fee".to_string()]];
        let freq = frequency_table(&token_sets);
        let scores = score_sentences(&token_sets, &freq);
        let base = 2.0 / (1.0 + EPSILON);
        assert!((scores[0] - base * 1.1).abs() < 1e-9);
        assert!(scores[1] < scores[0]);
        assert!(scores[1] > base);
    }
}
