//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the stage and the outside
//! world. Implementations live in other crates.

use crate::{Credentials, Row, RowShape};

/// Host pipeline side of the row protocol
///
/// Implemented by the pipeline runtime (or `tweetscan-stage::MemoryRowStream`
/// in tests).
pub trait RowStream {
    /// Error type for host operations
    type Error;

    /// Host base setup performed when a step initializes
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Shape of the incoming rows
    fn input_shape(&self) -> &RowShape;

    /// Pull the next input row, `None` once no more rows will arrive
    fn get_row(&mut self) -> Option<Row>;

    /// Push a row downstream
    fn put_row(&mut self, shape: &RowShape, row: Row) -> Result<(), Self::Error>;

    /// Signal that this step will produce no further rows
    fn set_output_done(&mut self);
}

/// Lifecycle of a step plugged into the pipeline
///
/// The host calls `init` once, then `process_row` until it returns `false`,
/// then `dispose` once.
pub trait Step<S: RowStream> {
    /// Prepare the step; `false` means the step cannot run
    fn init(&mut self, stream: &mut S) -> bool;

    /// Process one unit of work; `false` means do not call again
    fn process_row(&mut self, stream: &mut S) -> bool;

    /// Release everything acquired since `init`
    fn dispose(&mut self, stream: &mut S);
}

/// Trait for the authenticated search collaborator
///
/// Implemented by the infrastructure layer (tweetscan-client)
pub trait SearchClient {
    /// Error type for client operations
    type Error;

    /// Authenticate and establish a connection
    fn open(&mut self, credentials: Credentials<'_>) -> Result<(), Self::Error>;

    /// Run one search and return the raw response body
    ///
    /// `None` means the service answered without a body.
    fn search(&mut self, endpoint: &str, term: &str) -> Result<Option<String>, Self::Error>;

    /// Release the connection
    fn close(&mut self);
}
