//! Counters collected during a stage run

/// Counters for one run of a [`crate::SearchStage`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageMetrics {
    /// Input rows pulled from the host
    pub rows_read: u64,

    /// Output rows pushed to the host
    pub rows_written: u64,

    /// Status entries skipped as malformed
    pub entries_skipped: u64,

    /// Search requests issued
    pub fetches: u64,

    /// Times the output shape was computed
    pub shape_resolutions: u64,
}

impl StageMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input row
    pub fn record_row_read(&mut self) {
        self.rows_read += 1;
    }

    /// Record an output row
    pub fn record_row_written(&mut self) {
        self.rows_written += 1;
    }

    /// Record skipped status entries
    pub fn record_skipped(&mut self, count: usize) {
        self.entries_skipped += count as u64;
    }

    /// Record a search request
    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    /// Record an output shape computation
    pub fn record_shape_resolution(&mut self) {
        self.shape_resolutions += 1;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Search Stage Metrics Summary".to_string(),
            "============================".to_string(),
            format!("Rows read: {}", self.rows_read),
            format!("Rows written: {}", self.rows_written),
            format!("Entries skipped: {}", self.entries_skipped),
            format!("Fetches: {}", self.fetches),
            format!("Shape resolutions: {}", self.shape_resolutions),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        assert_eq!(StageMetrics::new(), StageMetrics::default());
        assert_eq!(StageMetrics::new().rows_written, 0);
    }

    #[test]
    fn test_record_counters() {
        let mut metrics = StageMetrics::new();
        metrics.record_row_read();
        metrics.record_fetch();
        metrics.record_shape_resolution();
        metrics.record_row_written();
        metrics.record_row_written();
        metrics.record_skipped(3);

        assert_eq!(metrics.rows_read, 1);
        assert_eq!(metrics.rows_written, 2);
        assert_eq!(metrics.entries_skipped, 3);
        assert_eq!(metrics.fetches, 1);
        assert_eq!(metrics.shape_resolutions, 1);
    }

    #[test]
    fn test_summary() {
        let mut metrics = StageMetrics::new();
        metrics.record_row_written();
        metrics.record_skipped(2);

        let summary = metrics.summary();
        assert!(summary.contains("Rows written: 1"));
        assert!(summary.contains("Entries skipped: 2"));
        assert!(summary.contains("Fetches: 0"));
    }
}
