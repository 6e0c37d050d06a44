/*!
 * Lexical keyword and key-phrase extraction.
 *
 * Keywords drive asset matching and overlay text; key phrases flag segments
 * that deserve on-screen emphasis. Everything here is purely lexical.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
        "during", "each", "even", "every", "few", "for", "from", "further", "get", "got", "had",
        "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
        "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "let",
        "like", "make", "many", "me", "might", "more", "most", "much", "must", "my", "myself",
        "no", "nor", "not", "now", "of", "off", "on", "once", "one", "only", "or", "other",
        "our", "ours", "ourselves", "out", "over", "own", "really", "same", "she", "should",
        "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "thing", "things", "this", "those", "through", "to",
        "too", "under", "until", "up", "very", "want", "was", "we", "well", "were", "what",
        "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
        "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

static QUOTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]+)"|“([^”]+)”"#).expect("Invalid quoted phrase regex")
});

// Two or more consecutive capitalized words
static BRAND_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z0-9]*(?:\s+[A-Z][A-Za-z0-9]*)+\b").expect("Invalid brand name regex")
});

static NUMBER_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]?\b\d+(?:[.,]\d+)?%?\s+[A-Za-z]+").expect("Invalid number phrase regex")
});

/// Lowercase a token and strip everything that is not alphanumeric
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Check a normalized word against the stop-word list
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Decide whether a raw token counts as a keyword.
///
/// A token qualifies when its normalized form has at least 3 characters, is
/// not a stop word, and it either starts with an uppercase letter, contains a
/// digit, or is at least 5 characters long.
pub fn is_keyword_token(token: &str) -> bool {
    let normalized = normalize_word(token);
    let len = normalized.chars().count();
    if len < 3 || is_stop_word(&normalized) {
        return false;
    }

    let starts_upper = token
        .chars()
        .find(|c| c.is_alphanumeric())
        .is_some_and(|c| c.is_uppercase());
    let has_digit = normalized.chars().any(|c| c.is_ascii_digit());

    starts_upper || has_digit || len >= 5
}

/// Extract the keywords of a text, normalized and deduplicated.
///
/// Keywords are returned in order of first appearance; callers treat the
/// result as a set.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for token in text.split_whitespace() {
        if !is_keyword_token(token) {
            continue;
        }
        let normalized = normalize_word(token);
        if seen.insert(normalized.clone()) {
            keywords.push(normalized);
        }
    }

    keywords
}

/// Extract quoted phrases in order of appearance
pub fn extract_quoted_phrases(text: &str) -> Vec<String> {
    QUOTED_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Extract "number + word" phrases such as "3 steps" or "50% faster"
pub fn extract_number_phrases(text: &str) -> Vec<String> {
    NUMBER_WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract key phrases: quoted substrings, capitalized multi-word sequences
/// and number + word patterns. Duplicates are removed, first occurrence wins.
pub fn extract_key_phrases(text: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    let mut push = |phrase: String| {
        if !phrases.iter().any(|p| p.eq_ignore_ascii_case(&phrase)) {
            phrases.push(phrase);
        }
    };

    for phrase in extract_quoted_phrases(text) {
        push(phrase);
    }
    for m in BRAND_NAME_REGEX.find_iter(text) {
        push(m.as_str().to_string());
    }
    for phrase in extract_number_phrases(text) {
        push(phrase);
    }

    phrases
}
