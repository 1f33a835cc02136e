//! Build output rows from parsed items

use crate::config::OutputFieldNames;
use serde_json::{Map, Value};
use tweetscan_domain::{
    EntityExtraction, FieldMeta, FieldValue, Row, RowShape, SearchResultItem,
};

/// Number of fields appended after the input fields
pub const ADDED_FIELD_COUNT: usize = 7;

/// Output shape of a run, resolved from the input shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    shape: RowShape,
    input_len: usize,
}

impl OutputLayout {
    /// Append the seven output fields to the input shape
    pub fn resolve(input: &RowShape, names: &OutputFieldNames) -> Self {
        let shape = input
            .clone()
            .with_field(FieldMeta::string(names.id.as_str()))
            .with_field(FieldMeta::string(names.text.as_str()))
            .with_field(FieldMeta::string(names.user_id.as_str()))
            .with_field(FieldMeta::integer(names.friends_count.as_str()))
            .with_field(FieldMeta::string(names.query.as_str()))
            .with_field(FieldMeta::string(names.mentions.as_str()))
            .with_field(FieldMeta::string(names.hashtags.as_str()));

        Self {
            shape,
            input_len: input.len(),
        }
    }

    /// Full output shape
    pub fn shape(&self) -> &RowShape {
        &self.shape
    }

    /// Number of leading fields carried over from the input row
    pub fn input_len(&self) -> usize {
        self.input_len
    }
}

/// Serialize tokens as `{"<key>":[...]}`, or `{}` when there are none
///
/// ```
/// use tweetscan_extractor::serialize_tokens;
///
/// assert_eq!(serialize_tokens("mentions", &["@bob".to_string()]), r#"{"mentions":["@bob"]}"#);
/// assert_eq!(serialize_tokens("hashtags", &[]), "{}");
/// ```
pub fn serialize_tokens(key: &str, tokens: &[String]) -> String {
    let mut object = Map::new();
    if !tokens.is_empty() {
        object.insert(key.to_string(), Value::from(tokens.to_vec()));
    }
    Value::Object(object).to_string()
}

/// Build one output row
///
/// Input values are copied into the leading positions; the seven added
/// fields follow in fixed order.
pub fn emit_record(
    item: &SearchResultItem,
    extraction: &EntityExtraction,
    input_row: &Row,
    layout: &OutputLayout,
) -> Row {
    let mut row = Row::allocate(layout.shape.len());

    for (index, value) in input_row.values().iter().take(layout.input_len).enumerate() {
        let stored = row.set(index, value.clone());
        debug_assert!(stored, "input field {} outside output row", index);
    }

    let added = [
        FieldValue::from(item.id.as_str()),
        FieldValue::from(item.text.as_str()),
        FieldValue::from(item.author.id.as_str()),
        FieldValue::Integer(item.author.friends_count),
        FieldValue::from(item.query.as_str()),
        FieldValue::String(serialize_tokens("mentions", &extraction.mentions)),
        FieldValue::String(serialize_tokens("hashtags", &extraction.hashtags)),
    ];
    for (offset, value) in added.into_iter().enumerate() {
        let stored = row.set(layout.input_len + offset, value);
        debug_assert!(stored, "added field {} outside output row", offset);
    }

    row
}
