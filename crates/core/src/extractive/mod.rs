//! Word-frequency extractive summarization.
//!
//! Content words are counted across the whole text, normalized by the most frequent one,
//! and every sentence is scored by the sum of its words' weights. The top-scoring
//! sentences are returned verbatim, highest score first.

mod stopwords;
mod tokenizer;

use std::collections::HashMap;

use tracing::debug;

pub use stopwords::is_stop_word;
pub use tokenizer::{LineTokenizer, Tokenizer, UnicodeTokenizer, has_sentence_terminator};

/// Share of sentences kept in the summary.
pub const DEFAULT_RATIO: f64 = 0.20;

pub fn summarize_extractive(text: &str, ratio: f64) -> String {
    summarize_extractive_with(&UnicodeTokenizer, text, ratio)
}

pub fn summarize_extractive_with<T: Tokenizer + ?Sized>(
    tokenizer: &T,
    text: &str,
    ratio: f64,
) -> String {
    let sentences = tokenizer.sentences(text);
    let words: Vec<Vec<String>> = sentences
        .iter()
        .map(|sentence| {
            tokenizer
                .words(sentence)
                .into_iter()
                .map(str::to_lowercase)
                .collect()
        })
        .collect();

    let frequencies = word_frequencies(words.iter().flatten());
    let mut scores = sentence_scores(&words, &frequencies);

    let select = (sentences.len() as f64 * ratio).floor() as usize;
    debug!(
        sentences = sentences.len(),
        scored = scores.len(),
        select,
        "Scored sentences"
    );
    if select == 0 {
        return String::new();
    }

    // Stable sort: equal scores keep document order.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    scores
        .into_iter()
        .take(select)
        .map(|(index, _)| sentences[index])
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_punctuation(token: &str) -> bool {
    token.chars().all(|c| !c.is_alphanumeric())
}

fn word_frequencies<'a>(words: impl Iterator<Item = &'a String>) -> HashMap<&'a str, f64> {
    let mut counts: HashMap<&str, f64> = HashMap::new();
    for word in words {
        if is_stop_word(word) || is_punctuation(word) {
            continue;
        }
        *counts.entry(word.as_str()).or_default() += 1.0;
    }

    let max = counts.values().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for weight in counts.values_mut() {
            *weight /= max;
        }
    }
    counts
}

/// `(sentence index, score)` for every sentence containing at least one scored word.
fn sentence_scores(sentences: &[Vec<String>], frequencies: &HashMap<&str, f64>) -> Vec<(usize, f64)> {
    sentences
        .iter()
        .enumerate()
        .filter_map(|(index, words)| {
            let mut matched = false;
            let mut score = 0.0;
            for weight in words.iter().filter_map(|w| frequencies.get(w.as_str())) {
                matched = true;
                score += weight;
            }
            matched.then_some((index, score))
        })
        .collect()
}
