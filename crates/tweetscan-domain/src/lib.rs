//! Tweetscan Domain Layer
//!
//! This crate contains the domain model for the tweetscan search stage.
//! It has no infrastructure dependencies and defines the value objects and
//! trait interfaces that the client, extractor and stage crates depend upon.
//!
//! ## Key Concepts
//!
//! - **Row / RowShape**: positional records flowing through the host pipeline
//! - **ConnectionDescriptor**: parameters for the single search request of a run
//! - **SearchResultItem**: one parsed status entry of a search response
//! - **EntityExtraction**: mentions and hashtags found in a status text
//! - **StageState**: lifecycle of a stage, with an explicit transition table
//!
//! ## Architecture
//!
//! - No HTTP, JSON or logging here
//! - Trait definitions for the host pipeline, the stage lifecycle and the
//!   fetch collaborator live in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod entities;
pub mod row;
pub mod run;
pub mod search;
pub mod state;
pub mod traits;

// Re-exports for convenience
pub use descriptor::{ConnectionDescriptor, Credentials};
pub use entities::EntityExtraction;
pub use row::{FieldMeta, FieldType, FieldValue, Row, RowShape};
pub use run::RunId;
pub use search::{SearchAuthor, SearchResultItem};
pub use state::StageState;
