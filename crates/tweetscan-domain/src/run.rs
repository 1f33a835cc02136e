//! Run identifiers

use std::fmt;
use uuid::Uuid;

/// Unique identifier for one execution of a stage, based on UUIDv7
///
/// Every log line of a run carries this id so that parallel copies of the
/// stage can be told apart.
///
/// ```
/// use tweetscan_domain::RunId;
///
/// assert_ne!(RunId::new(), RunId::new());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    /// Mint a fresh id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_distinct() {
        assert_ne!(RunId::new(), RunId::new());
    }

    #[test]
    fn test_display_is_hyphenated_v7() {
        let shown = RunId::new().to_string();
        assert_eq!(shown.len(), 36);
        assert_eq!(shown.matches('-').count(), 4);
        assert_eq!(&shown[14..15], "7");
    }
}
