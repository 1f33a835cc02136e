//! Tweetscan Search Stage
//!
//! A pipeline step that turns one connection descriptor into a stream of
//! search results.
//!
//! # Overview
//!
//! The stage is driven by the host pipeline through the `Step` lifecycle:
//!
//! ```text
//! init ──→ process_row (first call: fetch → parse → extract → emit) ──→ dispose
//! ```
//!
//! - **init**: host base setup and config validation against the input
//!   shape, no I/O
//! - **process_row**: on the first call, reads field 0 of the input row as a
//!   JSON connection descriptor, opens the fetch connection, runs one search
//!   and pushes one row per status. Always returns `false`.
//! - **dispose**: closes the fetch connection if it was opened
//!
//! Every lifecycle call runs inside a `search_stage` tracing span carrying
//! the run id.
//!
//! # Failure policy
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Output field names empty, duplicated or shadowing an input field | `init` fails, run `Failed` |
//! | Descriptor missing or malformed | run `Failed`, nothing emitted |
//! | Open or search fails | run `Failed`, nothing emitted |
//! | Response top level unreadable | run `Failed`, nothing emitted |
//! | Echoed query missing or undecodable | run `Failed`, nothing emitted |
//! | One status entry malformed | entry skipped, run continues |
//!
//! # Configuration
//!
//! ```
//! use tweetscan_stage::StageConfig;
//!
//! let config = StageConfig::from_toml(r#"
//!     feedback_size = 1000
//!
//!     [fields]
//!     id = "tweet_id"
//! "#).unwrap();
//! assert_eq!(config.fields.id, "tweet_id");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod metrics;
pub mod run_state;
pub mod runner;
pub mod stage;
pub mod stream;

pub use config::{StageConfig, StageConfigError, DEFAULT_FEEDBACK_SIZE};
pub use descriptor::decode_descriptor;
pub use error::StageError;
pub use metrics::StageMetrics;
pub use run_state::StageRunState;
pub use runner::{run_step, RunSummary};
pub use stage::SearchStage;
pub use stream::{HostError, MemoryRowStream};
