//! Entities extracted from status text

/// Mentions and hashtags found in one status text
///
/// Both sequences are in order of appearance. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntityExtraction {
    /// `@` tokens, sigils included
    pub mentions: Vec<String>,

    /// `#` tokens, sigils included
    pub hashtags: Vec<String>,
}

impl EntityExtraction {
    /// Create an extraction from its two sequences
    pub fn new(mentions: Vec<String>, hashtags: Vec<String>) -> Self {
        Self { mentions, hashtags }
    }

    /// Whether neither rule matched anything
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty() && self.hashtags.is_empty()
    }
}
