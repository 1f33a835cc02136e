//! Search result items

/// Author of a status entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAuthor {
    /// Author identifier
    pub id: String,

    /// Number of accounts the author follows
    pub friends_count: i64,
}

/// One parsed status entry of a search response
///
/// Immutable once built by the response parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    /// Status identifier
    pub id: String,

    /// Status body text
    pub text: String,

    /// Author of the status
    pub author: SearchAuthor,

    /// Query string echoed by the search service, percent-decoded
    pub query: String,
}
