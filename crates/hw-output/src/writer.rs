//! The `OutputWriter` trait implemented by backend writers.

use crate::{LaneSnapshotRow, OutputResult, StepSummaryRow};

/// Trait implemented by output backends.
///
/// Errors are returned here but swallowed by the observer, which keeps the
/// first one for [`HighwayOutputObserver::take_error`][crate::HighwayOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Write the lane rows of one snapshot.
    fn write_snapshot(&mut self, rows: &[LaneSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
