//! Per-run bookkeeping owned by the stage

use tweetscan_domain::RowShape;
use tweetscan_extractor::{OutputFieldNames, OutputLayout};

/// State of one run, from `init` to `dispose`
#[derive(Debug, Clone, Default)]
pub struct StageRunState {
    initialized: bool,
    first_call_taken: bool,
    layout: Option<OutputLayout>,
}

impl StageRunState {
    /// Fresh state for a new run
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that host setup completed
    pub fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Whether host setup completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Claim the first call; `true` only the first time
    pub fn take_first_call(&mut self) -> bool {
        !std::mem::replace(&mut self.first_call_taken, true)
    }

    /// Resolve the output layout unless it already is
    ///
    /// Returns `true` when the layout was computed by this call.
    pub fn resolve_layout(&mut self, input: &RowShape, names: &OutputFieldNames) -> bool {
        if self.layout.is_some() {
            return false;
        }
        self.layout = Some(OutputLayout::resolve(input, names));
        true
    }

    /// The resolved layout, if any
    pub fn layout(&self) -> Option<&OutputLayout> {
        self.layout.as_ref()
    }
}
