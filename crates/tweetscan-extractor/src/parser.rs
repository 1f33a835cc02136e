//! Parse search responses into result items
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "statuses": [
//!     { "id_str": "1", "text": "hi @bob", "user": { "id_str": "9", "friends_count": 12 } }
//!   ],
//!   "search_metadata": { "query": "%40bob" }
//! }
//! ```
//!
//! A broken status entry is logged and skipped. A broken top level fails
//! the whole response.

use crate::error::{EntryError, ResponseError};
use crate::query::decode_query;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use tweetscan_domain::{SearchAuthor, SearchResultItem};

/// Result of parsing one search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// No body, or no status entries
    Empty,
    /// At least one status entry was present
    Parsed(ParsedResponse),
}

impl ParseOutcome {
    /// Parsed items, in response order (empty for `Empty`)
    pub fn items(&self) -> &[SearchResultItem] {
        match self {
            ParseOutcome::Empty => &[],
            ParseOutcome::Parsed(parsed) => &parsed.items,
        }
    }
}

/// Items and skipped entries of a non-empty response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Well-formed entries, in response order
    pub items: Vec<SearchResultItem>,
    /// Entries that could not be interpreted
    pub skipped: Vec<SkippedEntry>,
}

/// A status entry left out of the result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position in the `statuses` array
    pub index: usize,
    /// Why it was skipped
    pub reason: EntryError,
}

/// Parse a raw search response body
///
/// `None` or a blank body yields [`ParseOutcome::Empty`].
pub fn parse_search_response(raw: Option<&str>) -> Result<ParseOutcome, ResponseError> {
    let raw = match raw.map(str::trim) {
        Some(body) if !body.is_empty() => body,
        _ => {
            debug!("Search response has no body");
            return Ok(ParseOutcome::Empty);
        }
    };

    let json: Value = serde_json::from_str(raw)?;
    let root = json
        .as_object()
        .ok_or_else(|| ResponseError::InvalidStructure("Expected a JSON object".to_string()))?;

    let statuses = root
        .get("statuses")
        .and_then(Value::as_array)
        .ok_or_else(|| ResponseError::InvalidStructure("Missing 'statuses' array".to_string()))?;

    if statuses.is_empty() {
        debug!("Search response has no statuses");
        return Ok(ParseOutcome::Empty);
    }

    let query = echoed_query(root)?;

    let mut items = Vec::with_capacity(statuses.len());
    let mut skipped = Vec::new();
    for (index, entry) in statuses.iter().enumerate() {
        match parse_entry(entry, &query) {
            Ok(item) => items.push(item),
            Err(reason) => {
                warn!("Skipping status {}: {}", index, reason);
                skipped.push(SkippedEntry { index, reason });
            }
        }
    }

    Ok(ParseOutcome::Parsed(ParsedResponse { items, skipped }))
}

fn echoed_query(root: &Map<String, Value>) -> Result<String, ResponseError> {
    let metadata = root
        .get("search_metadata")
        .and_then(Value::as_object)
        .ok_or_else(|| ResponseError::MissingQuery("Missing 'search_metadata' object".to_string()))?;

    let query = metadata
        .get("query")
        .and_then(Value::as_str)
        .ok_or_else(|| ResponseError::MissingQuery("Missing 'search_metadata.query'".to_string()))?;

    decode_query(query)
}

fn parse_entry(entry: &Value, query: &str) -> Result<SearchResultItem, EntryError> {
    let obj = entry.as_object().ok_or(EntryError::NotAnObject)?;

    let id = required_str(obj, "id_str", "id_str")?;
    let text = required_str(obj, "text", "text")?;

    let author = match obj.get("user") {
        Some(Value::Object(user)) => parse_author(user)?,
        Some(Value::String(encoded)) => {
            let decoded: Value = serde_json::from_str(encoded)
                .map_err(|e| EntryError::InvalidAuthor(e.to_string()))?;
            match decoded {
                Value::Object(user) => parse_author(&user)?,
                _ => {
                    return Err(EntryError::InvalidAuthor(
                        "Encoded author is not an object".to_string(),
                    ))
                }
            }
        }
        Some(_) => {
            return Err(EntryError::InvalidAuthor(
                "Expected an object or an encoded object".to_string(),
            ))
        }
        None => return Err(EntryError::MissingField("user".to_string())),
    };

    Ok(SearchResultItem {
        id,
        text,
        author,
        query: query.to_string(),
    })
}

fn parse_author(user: &Map<String, Value>) -> Result<SearchAuthor, EntryError> {
    let id = required_str(user, "id_str", "user.id_str")?;

    let friends_count = match user.get("friends_count") {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| EntryError::InvalidCount(n.to_string()))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| EntryError::InvalidCount(s.clone()))?,
        Some(other) => return Err(EntryError::InvalidCount(other.to_string())),
        None => return Err(EntryError::MissingField("user.friends_count".to_string())),
    };

    Ok(SearchAuthor { id, friends_count })
}

fn required_str(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String, EntryError> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| EntryError::MissingField(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(outcome: ParseOutcome) -> ParsedResponse {
        match outcome {
            ParseOutcome::Parsed(p) => p,
            ParseOutcome::Empty => panic!("expected parsed response"),
        }
    }

    #[test]
    fn test_parse_valid_response() {
        let raw = r##"{
            "statuses": [
                {"id_str": "100", "text": "hi @bob", "user": {"id_str": "7", "friends_count": 12}},
                {"id_str": "101", "text": "#rust", "user": {"id_str": "8", "friends_count": 0}}
            ],
            "search_metadata": {"query": "%40bob+OR+%23rust"}
        }"##;

        let response = parsed(parse_search_response(Some(raw)).unwrap());
        assert!(response.skipped.is_empty());
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].id, "100");
        assert_eq!(response.items[0].text, "hi @bob");
        assert_eq!(response.items[0].author.id, "7");
        assert_eq!(response.items[0].author.friends_count, 12);
        assert_eq!(response.items[0].query, "@bob OR #rust");
        assert_eq!(response.items[1].id, "101");
        assert_eq!(response.items[1].query, "@bob OR #rust");
    }

    #[test]
    fn test_absent_or_blank_body_is_empty() {
        assert_eq!(parse_search_response(None).unwrap(), ParseOutcome::Empty);
        assert_eq!(parse_search_response(Some("")).unwrap(), ParseOutcome::Empty);
        assert_eq!(parse_search_response(Some("  \n")).unwrap(), ParseOutcome::Empty);
    }

    #[test]
    fn test_no_statuses_is_empty_without_metadata() {
        let outcome = parse_search_response(Some(r#"{"statuses": []}"#)).unwrap();
        assert_eq!(outcome, ParseOutcome::Empty);
        assert!(outcome.items().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let result = parse_search_response(Some("{not json"));
        assert!(matches!(result, Err(ResponseError::InvalidJson(_))));
    }

    #[test]
    fn test_invalid_top_level() {
        assert!(matches!(
            parse_search_response(Some("[]")),
            Err(ResponseError::InvalidStructure(_))
        ));
        assert!(matches!(
            parse_search_response(Some(r#"{"statuses": {}}"#)),
            Err(ResponseError::InvalidStructure(_))
        ));
        assert!(matches!(
            parse_search_response(Some(r#"{"errors": []}"#)),
            Err(ResponseError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_missing_metadata() {
        let raw = r#"{"statuses": [{"id_str": "1", "text": "x", "user": {"id_str": "2", "friends_count": 3}}]}"#;
        assert!(matches!(
            parse_search_response(Some(raw)),
            Err(ResponseError::MissingQuery(_))
        ));
    }

    #[test]
    fn test_missing_query_in_metadata() {
        let raw = r#"{"statuses": [{"id_str": "1", "text": "x", "user": {"id_str": "2", "friends_count": 3}}],
                      "search_metadata": {"count": 15}}"#;
        assert!(matches!(
            parse_search_response(Some(raw)),
            Err(ResponseError::MissingQuery(_))
        ));
    }

    #[test]
    fn test_undecodable_query() {
        let raw = r#"{"statuses": [{"id_str": "1", "text": "x", "user": {"id_str": "2", "friends_count": 3}}],
                      "search_metadata": {"query": "50%"}}"#;
        assert!(matches!(
            parse_search_response(Some(raw)),
            Err(ResponseError::Encoding(_))
        ));
    }

    #[test]
    fn test_author_as_encoded_string() {
        let raw = r#"{
            "statuses": [
                {"id_str": "1", "text": "x", "user": "{\"id_str\": \"42\", \"friends_count\": 5}"}
            ],
            "search_metadata": {"query": "x"}
        }"#;

        let response = parsed(parse_search_response(Some(raw)).unwrap());
        assert_eq!(response.items[0].author.id, "42");
        assert_eq!(response.items[0].author.friends_count, 5);
    }

    #[test]
    fn test_count_as_numeric_string() {
        let raw = r#"{
            "statuses": [{"id_str": "1", "text": "x", "user": {"id_str": "2", "friends_count": "77"}}],
            "search_metadata": {"query": "x"}
        }"#;

        let response = parsed(parse_search_response(Some(raw)).unwrap());
        assert_eq!(response.items[0].author.friends_count, 77);
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let raw = r#"{
            "statuses": [
                {"id_str": "1", "text": "first", "user": {"id_str": "a", "friends_count": 1}},
                {"id_str": "2", "user": {"id_str": "b", "friends_count": 2}},
                {"id_str": "3", "text": "third", "user": {"id_str": "c", "friends_count": 1.5}},
                {"id_str": "4", "text": "fourth", "user": "not json"},
                "just a string",
                {"id_str": "6", "text": "sixth", "user": {"id_str": "f", "friends_count": 6}}
            ],
            "search_metadata": {"query": "q"}
        }"#;

        let response = parsed(parse_search_response(Some(raw)).unwrap());

        let ids: Vec<&str> = response.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "6"]);

        assert_eq!(response.skipped.len(), 4);
        assert_eq!(response.skipped[0].index, 1);
        assert_eq!(response.skipped[0].reason, EntryError::MissingField("text".to_string()));
        assert!(matches!(response.skipped[1].reason, EntryError::InvalidCount(_)));
        assert!(matches!(response.skipped[2].reason, EntryError::InvalidAuthor(_)));
        assert_eq!(response.skipped[3].reason, EntryError::NotAnObject);
    }

    #[test]
    fn test_missing_author_fields() {
        let raw = r#"{
            "statuses": [
                {"id_str": "1", "text": "x"},
                {"id_str": "2", "text": "x", "user": {"friends_count": 1}},
                {"id_str": "3", "text": "x", "user": {"id_str": "c"}}
            ],
            "search_metadata": {"query": "x"}
        }"#;

        let response = parsed(parse_search_response(Some(raw)).unwrap());
        assert!(response.items.is_empty());

        let reasons: Vec<EntryError> = response.skipped.into_iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                EntryError::MissingField("user".to_string()),
                EntryError::MissingField("user.id_str".to_string()),
                EntryError::MissingField("user.friends_count".to_string()),
            ]
        );
    }
}
