//! Stage lifecycle states

use std::fmt;

/// Lifecycle state of a stage
///
/// ```text
/// Created → Initialized → Running → Done → Disposed
///    │           │           │               ▲
///    │           └──→ Done   └──→ Failed ────┤
///    └──→ Failed ────────────────────────────┘
/// ```
///
/// `Created → Disposed` is also allowed so that disposing after a failed
/// init is always safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageState {
    /// Constructed, host not yet initialized
    Created,

    /// `init` succeeded, waiting for the first `process_row`
    Initialized,

    /// First call in progress: fetch, parse and emit
    Running,

    /// Output done signalled; no further work
    Done,

    /// A fatal error ended the run
    Failed,

    /// Resources released
    Disposed,
}

impl StageState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StageState::Created => "created",
            StageState::Initialized => "initialized",
            StageState::Running => "running",
            StageState::Done => "done",
            StageState::Failed => "failed",
            StageState::Disposed => "disposed",
        }
    }

    /// Whether `self → next` is a legal transition
    pub fn can_transition_to(&self, next: StageState) -> bool {
        use StageState::*;

        matches!(
            (*self, next),
            (Created, Initialized)
                | (Created, Failed)
                | (Initialized, Running)
                | (Initialized, Done)
                | (Running, Done)
                | (Running, Failed)
                | (Created, Disposed)
                | (Initialized, Disposed)
                | (Done, Disposed)
                | (Failed, Disposed)
        )
    }

    /// Whether the run has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StageState::Done | StageState::Failed | StageState::Disposed
        )
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
