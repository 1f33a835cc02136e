//! In-memory host for running a step without a pipeline runtime

use std::collections::VecDeque;
use thiserror::Error;
use tweetscan_domain::traits::RowStream;
use tweetscan_domain::{Row, RowShape};

/// Error raised by [`MemoryRowStream`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Host error: {0}")]
pub struct HostError(pub String);

/// Row host backed by in-memory queues
///
/// # Examples
///
/// ```
/// use tweetscan_domain::traits::RowStream;
/// use tweetscan_domain::{FieldMeta, FieldValue, Row, RowShape};
/// use tweetscan_stage::MemoryRowStream;
///
/// let shape = RowShape::new(vec![FieldMeta::string("params")]);
/// let mut stream = MemoryRowStream::with_rows(shape, vec![Row::new(vec![FieldValue::from("{}")])]);
///
/// assert!(stream.get_row().is_some());
/// assert!(stream.get_row().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRowStream {
    input_shape: RowShape,
    input: VecDeque<Row>,
    output: Vec<Row>,
    output_shape: Option<RowShape>,
    output_done: bool,
    begin_error: Option<String>,
    put_limit: Option<usize>,
    get_row_calls: usize,
}

impl MemoryRowStream {
    /// Create a host with no queued rows
    pub fn new(input_shape: RowShape) -> Self {
        Self {
            input_shape,
            ..Self::default()
        }
    }

    /// Create a host with queued input rows
    pub fn with_rows(input_shape: RowShape, rows: Vec<Row>) -> Self {
        Self {
            input: rows.into(),
            ..Self::new(input_shape)
        }
    }

    /// Queue another input row
    pub fn push_row(&mut self, row: Row) {
        self.input.push_back(row);
    }

    /// Make `begin` fail with the given message
    pub fn fail_begin(mut self, message: impl Into<String>) -> Self {
        self.begin_error = Some(message.into());
        self
    }

    /// Reject every `put_row` once `accepted` rows have been taken
    pub fn fail_put_after(mut self, accepted: usize) -> Self {
        self.put_limit = Some(accepted);
        self
    }

    /// Rows pushed so far
    pub fn output_rows(&self) -> &[Row] {
        &self.output
    }

    /// Shape passed with the first pushed row
    pub fn output_shape(&self) -> Option<&RowShape> {
        self.output_shape.as_ref()
    }

    /// Whether the step signalled it is done
    pub fn is_output_done(&self) -> bool {
        self.output_done
    }

    /// Input rows not yet pulled
    pub fn rows_remaining(&self) -> usize {
        self.input.len()
    }

    /// Number of `get_row` calls made
    pub fn get_row_calls(&self) -> usize {
        self.get_row_calls
    }
}

impl RowStream for MemoryRowStream {
    type Error = HostError;

    fn begin(&mut self) -> Result<(), Self::Error> {
        match &self.begin_error {
            Some(message) => Err(HostError(message.clone())),
            None => Ok(()),
        }
    }

    fn input_shape(&self) -> &RowShape {
        &self.input_shape
    }

    fn get_row(&mut self) -> Option<Row> {
        self.get_row_calls += 1;
        self.input.pop_front()
    }

    fn put_row(&mut self, shape: &RowShape, row: Row) -> Result<(), Self::Error> {
        if self.put_limit.is_some_and(|limit| self.output.len() >= limit) {
            return Err(HostError(format!(
                "Downstream rejected row {}",
                self.output.len() + 1
            )));
        }
        if self.output_shape.is_none() {
            self.output_shape = Some(shape.clone());
        }
        self.output.push(row);
        Ok(())
    }

    fn set_output_done(&mut self) {
        self.output_done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetscan_domain::{FieldMeta, FieldValue};

    fn shape() -> RowShape {
        RowShape::new(vec![FieldMeta::string("params")])
    }

    #[test]
    fn test_rows_pulled_in_order() {
        let mut stream = MemoryRowStream::new(shape());
        stream.push_row(Row::new(vec![FieldValue::from("a")]));
        stream.push_row(Row::new(vec![FieldValue::from("b")]));

        assert_eq!(stream.rows_remaining(), 2);
        assert_eq!(stream.get_row().and_then(|r| r.get(0).cloned()), Some(FieldValue::from("a")));
        assert_eq!(stream.get_row().and_then(|r| r.get(0).cloned()), Some(FieldValue::from("b")));
        assert!(stream.get_row().is_none());
        assert_eq!(stream.get_row_calls(), 3);
    }

    #[test]
    fn test_begin_failure() {
        let mut stream = MemoryRowStream::new(shape()).fail_begin("no repository");
        assert_eq!(stream.begin(), Err(HostError("no repository".to_string())));
    }

    #[test]
    fn test_put_limit() {
        let mut stream = MemoryRowStream::new(shape()).fail_put_after(1);
        let out = shape().with_field(FieldMeta::string("id"));

        assert!(stream.put_row(&out, Row::allocate(2)).is_ok());
        assert!(stream.put_row(&out, Row::allocate(2)).is_err());
        assert_eq!(stream.output_rows().len(), 1);
        assert_eq!(stream.output_shape(), Some(&out));
    }

    #[test]
    fn test_output_done_flag() {
        let mut stream = MemoryRowStream::new(shape());
        assert!(!stream.is_output_done());
        stream.set_output_done();
        assert!(stream.is_output_done());
    }
}
