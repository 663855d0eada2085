//! Extractive article summarizer.
//!
//! Scores sentences by the document-wide frequency of their content words
//! (normalized by sentence length) and keeps the top scorers in their
//! original order. Deterministic, pure, no I/O.

use std::collections::HashMap;

/// Words too common to signal relevance.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "has", "have", "he",
    "her", "his", "in", "is", "it", "its", "of", "on", "or", "said", "she", "that", "the",
    "their", "they", "this", "to", "was", "were", "which", "will", "with",
];

/// Produce an extractive summary of at most `max_sentences` sentences.
///
/// Sentences keep their original order regardless of score; ties favor the
/// earlier sentence. Text with no more than `max_sentences` sentences is
/// returned unchanged apart from whitespace normalization.
#[must_use]
pub fn summarize(text: &str, max_sentences: usize) -> String {
    if max_sentences == 0 {
        return String::new();
    }

    let sentences = split_sentences(text);
    if sentences.len() <= max_sentences {
        return sentences.join(" ");
    }

    let frequencies = word_frequencies(&sentences);
    let mut scored: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| (idx, score_sentence(sentence, &frequencies)))
        .collect();

    // Highest score first; earlier sentence wins ties.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

    let mut keep: Vec<usize> = scored.iter().take(max_sentences).map(|(idx, _)| *idx).collect();
    keep.sort_unstable();

    keep.iter()
        .map(|&idx| sentences[idx].as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }
    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

fn content_words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
}

fn word_frequencies(sentences: &[String]) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for sentence in sentences {
        for word in content_words(sentence) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
    }
    frequencies
}

#[allow(clippy::cast_precision_loss)]
fn score_sentence(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    let mut total = 0usize;
    let mut words = 0usize;
    for word in content_words(sentence) {
        total += frequencies.get(&word).copied().unwrap_or(0);
        words += 1;
    }
    if words == 0 {
        return 0.0;
    }
    total as f64 / words as f64
}
