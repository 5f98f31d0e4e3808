//! Step observer trait for progress reporting and data collection.

use hw_core::Step;
use hw_grid::Grid;

use crate::StepReport;

/// Per-step aggregate handed to [`StepObserver::on_step_end`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepSummary {
    pub report: StepReport,
    /// `Highway::highway_velocity()` after the step.
    pub mean_velocity: Option<f64>,
    /// Cumulative flow count after the step.
    pub flow_count: u64,
}

/// Callbacks invoked by [`Highway::run`][crate::Highway::run] at key points
/// in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl StepObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, summary: &StepSummary) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: flow {}", summary.flow_count);
///         }
///     }
/// }
/// ```
pub trait StepObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called at the end of each step.
    fn on_step_end(&mut self, _step: Step, _summary: &StepSummary) {}

    /// Called at snapshot intervals (every `run.output_interval_steps` steps)
    /// with the grid as it stands after the step.
    fn on_snapshot(&mut self, _step: Step, _grid: &Grid) {}

    /// Called once after the final step completes.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`StepObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl StepObserver for NoopObserver {}
