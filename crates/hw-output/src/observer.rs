//! `HighwayOutputObserver<W>` bridges `StepObserver` to an `OutputWriter`.

use hw_core::Step;
use hw_grid::Grid;
use hw_sim::{StepObserver, StepSummary};

use crate::row::{LaneSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`StepObserver`] that writes step summaries and lane snapshots to any
/// [`OutputWriter`] backend.
///
/// Observer hooks cannot fail, so writer errors are stored.  After
/// `highway.run()` returns, check with [`take_error`][Self::take_error].
pub struct HighwayOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> HighwayOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> StepObserver for HighwayOutputObserver<W> {
    fn on_step_end(&mut self, step: Step, summary: &StepSummary) {
        let result = self.writer.write_step_summary(&StepSummaryRow::new(step.0, summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, step: Step, grid: &Grid) {
        let rows = LaneSnapshotRow::from_grid(step.0, grid);
        let result = self.writer.write_snapshot(&rows);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
