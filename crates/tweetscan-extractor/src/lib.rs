//! Tweetscan Extractor
//!
//! Turns a raw search response into output rows.
//!
//! # Architecture
//!
//! ```text
//! body → parse_search_response → SearchResultItem* ─┬→ extract_entities ─┐
//!                                                   └────────────────────┴→ emit_record → Row
//! ```
//!
//! Every function here is pure; fetching and row delivery belong to
//! `tweetscan-stage`.
//!
//! # Example Usage
//!
//! ```
//! use tweetscan_domain::{FieldMeta, FieldValue, Row, RowShape};
//! use tweetscan_extractor::{
//!     emit_record, extract_entities, parse_search_response, OutputFieldNames, OutputLayout,
//! };
//!
//! let body = r#"{
//!     "statuses": [{"id_str": "1", "text": "hi @bob", "user": {"id_str": "2", "friends_count": 3}}],
//!     "search_metadata": {"query": "bob"}
//! }"#;
//!
//! let input_shape = RowShape::new(vec![FieldMeta::string("params")]);
//! let layout = OutputLayout::resolve(&input_shape, &OutputFieldNames::default());
//! let input = Row::new(vec![FieldValue::from("{}")]);
//!
//! let outcome = parse_search_response(Some(body)).unwrap();
//! let rows: Vec<Row> = outcome
//!     .items()
//!     .iter()
//!     .map(|item| emit_record(item, &extract_entities(&item.text), &input, &layout))
//!     .collect();
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].get(6), Some(&FieldValue::from(r#"{"mentions":["@bob"]}"#)));
//! ```

#![warn(missing_docs)]

mod config;
mod emitter;
mod entities;
mod error;
mod parser;
mod query;


pub use config::OutputFieldNames;
pub use emitter::{emit_record, serialize_tokens, OutputLayout, ADDED_FIELD_COUNT};
pub use entities::{extract_entities, extract_hashtags, extract_mentions};
pub use error::{ConfigError, EntryError, ResponseError};
pub use parser::{parse_search_response, ParseOutcome, ParsedResponse, SkippedEntry};
pub use query::decode_query;
