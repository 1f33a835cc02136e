//! Mention and hashtag extraction
//!
//! A token is a run of one or more sigils followed by at least one ASCII
//! letter, digit, `_` or `-`, and it must start the text or follow ASCII
//! whitespace (space, tab, newline, vertical tab, form feed, carriage
//! return). The recorded token keeps its sigils (`@@bob` stays `@@bob`)
//! and drops the boundary whitespace.

use regex::Regex;
use std::sync::LazyLock;
use tweetscan_domain::EntityExtraction;

static MENTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?-u:\s)|\A)@+([A-Za-z0-9_-]+)").expect("mention pattern is valid")
});

static HASHTAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?-u:\s)|\A)#+([A-Za-z0-9_-]+)").expect("hashtag pattern is valid")
});

fn is_boundary(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn scan(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim_start_matches(is_boundary).to_string())
        .collect()
}

/// `@` tokens in order of appearance, duplicates kept
pub fn extract_mentions(text: &str) -> Vec<String> {
    scan(&MENTION_PATTERN, text)
}

/// `#` tokens in order of appearance, duplicates kept
pub fn extract_hashtags(text: &str) -> Vec<String> {
    scan(&HASHTAG_PATTERN, text)
}

/// Extract mentions and hashtags from a status text
///
/// # Examples
///
/// ```
/// use tweetscan_extractor::extract_entities;
///
/// let found = extract_entities("hello @bob and @carol, see #news #tech");
/// assert_eq!(found.mentions, vec!["@bob", "@carol"]);
/// assert_eq!(found.hashtags, vec!["#news", "#tech"]);
/// ```
pub fn extract_entities(text: &str) -> EntityExtraction {
    EntityExtraction::new(extract_mentions(text), extract_hashtags(text))
}
