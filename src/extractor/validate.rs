use crate::segmenter::profile::count_words;
use std::collections::HashMap;

const MIN_WORD_COUNT: usize = 10;
const MAX_NOISE_KEYWORDS: usize = 5;
const MIN_WORD_DENSITY: f64 = 0.05;
const MIN_AVG_SENTENCE_WORDS: f64 = 3.0;
const HIGH_FREQ_WORD_RATIO: f64 = 0.15;
const MAX_HIGH_FREQ_SHARE: f64 = 0.3;

/// Chrome and junk phrases that indicate the extractor grabbed navigation or
/// a consent wall instead of the article.
const NOISE_KEYWORDS: &[&str] = &[
    "click here",
    "read more",
    "subscribe",
    "newsletter",
    "advertisement",
    "sponsored",
    "cookie",
    "privacy policy",
    "terms of service",
    "all rights reserved",
    "copyright",
    "follow us",
    "like us",
    "share this",
    "tweet this",
    "join the discussion",
    "leave a comment",
    "about us",
    "contact us",
    "disclaimer",
];

/// Multi-signal check that extracted text is genuine article prose rather
/// than a scraping artifact. Length itself is checked by the caller.
pub fn is_valid_article(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    let word_count = count_words(trimmed);
    if word_count < MIN_WORD_COUNT {
        return false;
    }

    let sentence_count = trimmed
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    if sentence_count < 1 {
        return false;
    }

    let lower = trimmed.to_lowercase();
    let noise_count = NOISE_KEYWORDS
        .iter()
        .filter(|kw| lower.contains(*kw))
        .count();
    if noise_count > MAX_NOISE_KEYWORDS {
        return false;
    }

    // Word density: mostly-punctuation or mostly-markup blobs score low
    let density = word_count as f64 / trimmed.chars().count() as f64;
    if density < MIN_WORD_DENSITY {
        return false;
    }

    let avg_sentence_words = word_count as f64 / sentence_count as f64;
    if avg_sentence_words < MIN_AVG_SENTENCE_WORDS {
        return false;
    }

    // A handful of words dominating the text usually means a repeated
    // widget or an infinite-scroll artifact, not prose.
    let words: Vec<&str> = lower.split_whitespace().collect();
    let total_words = words.len();
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        if word.len() > 3 {
            *frequency.entry(word).or_insert(0) += 1;
        }
    }
    let high_frequency_words = frequency
        .values()
        .filter(|&&count| count as f64 > total_words as f64 * HIGH_FREQ_WORD_RATIO)
        .count();
    if high_frequency_words as f64 > total_words as f64 * MAX_HIGH_FREQ_SHARE {
        return false;
    }

    true
}
