//! Rows and row shapes exchanged with the host pipeline
//!
//! Rows are positional: a field is identified by its index in the row's
//! [`RowShape`], never by name at emission time.

use std::fmt;

/// Value held by one field of a row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// Text value
    String(String),
    /// Integer value
    Integer(i64),
    /// Unset field
    #[default]
    Null,
}

impl FieldValue {
    /// Borrow the text of a string field
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value of an integer field
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether the field is unset
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Text
    String,
    /// Signed 64-bit integer
    Integer,
}

impl FieldType {
    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
        }
    }
}

/// Name and type of one field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldMeta {
    /// Field name
    pub name: String,
    /// Field type
    pub field_type: FieldType,
}

impl FieldMeta {
    /// Create a new field description
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Shorthand for a text field
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Shorthand for an integer field
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }
}

/// Ordered field layout of a row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowShape {
    fields: Vec<FieldMeta>,
}

impl RowShape {
    /// Create a shape from field descriptions
    pub fn new(fields: Vec<FieldMeta>) -> Self {
        Self { fields }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field descriptions in positional order
    pub fn fields(&self) -> &[FieldMeta] {
        &self.fields
    }

    /// Position of the first field with the given name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Append a field to the end of the shape
    pub fn push(&mut self, field: FieldMeta) {
        self.fields.push(field);
    }

    /// Builder-style variant of [`RowShape::push`]
    pub fn with_field(mut self, field: FieldMeta) -> Self {
        self.fields.push(field);
        self
    }
}

/// One positional record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    values: Vec<FieldValue>,
}

impl Row {
    /// Create a row from values
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    /// Allocate a row of `len` null fields
    pub fn allocate(len: usize) -> Self {
        Self {
            values: vec![FieldValue::Null; len],
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no fields
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a field by position
    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    /// Set a field by position
    ///
    /// Returns `false` if the index is outside the row.
    #[must_use]
    pub fn set(&mut self, index: usize, value: FieldValue) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// All values in positional order
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Consume the row and return its values
    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}

impl From<Vec<FieldValue>> for Row {
    fn from(values: Vec<FieldValue>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_is_all_null() {
        let row = Row::allocate(3);
        assert_eq!(row.len(), 3);
        assert!(row.values().iter().all(FieldValue::is_null));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut row = Row::allocate(1);
        assert!(row.set(0, "x".into()));
        assert!(!row.set(1, "y".into()));
        assert_eq!(row.get(0), Some(&FieldValue::String("x".to_string())));
    }

    #[test]
    fn test_shape_index_of() {
        let shape = RowShape::default()
            .with_field(FieldMeta::string("payload"))
            .with_field(FieldMeta::integer("friends_count"));

        assert_eq!(shape.len(), 2);
        assert_eq!(shape.index_of("friends_count"), Some(1));
        assert_eq!(shape.index_of("missing"), None);
        assert_eq!(shape.fields()[1].field_type, FieldType::Integer);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::from(42).to_string(), "42");
        assert_eq!(FieldValue::Null.to_string(), "null");
    }
}
