//! Drive a step through its lifecycle the way a host pipeline does

use tracing::debug;
use tweetscan_domain::traits::{RowStream, Step};

/// What happened during [`run_step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether `init` succeeded
    pub initialized: bool,
    /// Number of `process_row` calls made
    pub process_calls: usize,
}

/// Run `init`, then `process_row` until it returns `false`, then `dispose`
///
/// `dispose` runs whether or not `init` succeeded.
pub fn run_step<S, T>(step: &mut T, stream: &mut S) -> RunSummary
where
    S: RowStream,
    T: Step<S>,
{
    let initialized = step.init(stream);
    let mut process_calls = 0;

    if initialized {
        loop {
            process_calls += 1;
            if !step.process_row(stream) {
                break;
            }
        }
    }

    step.dispose(stream);
    debug!(
        "Step run complete (initialized: {}, process calls: {})",
        initialized, process_calls
    );

    RunSummary {
        initialized,
        process_calls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryRowStream;
    use tweetscan_domain::{Row, RowShape};

    /// Step that asks for `rounds` calls and records its lifecycle
    #[derive(Default)]
    struct CountingStep {
        init_ok: bool,
        rounds: usize,
        calls: usize,
        disposed: usize,
    }

    impl Step<MemoryRowStream> for CountingStep {
        fn init(&mut self, _stream: &mut MemoryRowStream) -> bool {
            self.init_ok
        }

        fn process_row(&mut self, stream: &mut MemoryRowStream) -> bool {
            self.calls += 1;
            stream.get_row();
            self.calls < self.rounds
        }

        fn dispose(&mut self, _stream: &mut MemoryRowStream) {
            self.disposed += 1;
        }
    }

    #[test]
    fn test_runs_until_step_stops() {
        let mut step = CountingStep {
            init_ok: true,
            rounds: 3,
            ..Default::default()
        };
        let mut stream = MemoryRowStream::with_rows(RowShape::default(), vec![Row::default(); 5]);

        let summary = run_step(&mut step, &mut stream);

        assert_eq!(
            summary,
            RunSummary {
                initialized: true,
                process_calls: 3
            }
        );
        assert_eq!(step.disposed, 1);
        assert_eq!(stream.rows_remaining(), 2);
    }

    #[test]
    fn test_failed_init_still_disposes() {
        let mut step = CountingStep::default();
        let mut stream = MemoryRowStream::new(RowShape::default());

        let summary = run_step(&mut step, &mut stream);

        assert!(!summary.initialized);
        assert_eq!(summary.process_calls, 0);
        assert_eq!(step.calls, 0);
        assert_eq!(step.disposed, 1);
    }
}
