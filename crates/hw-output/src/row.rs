//! Plain data row types written by output backends.

use hw_grid::Grid;
use hw_sim::StepSummary;

/// Aggregates for one executed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:          u64,
    /// Mean of per-lane mean velocities; `None` on an empty highway.
    pub mean_velocity: Option<f64>,
    pub flow_count:    u64,
    pub lane_changes:  usize,
    pub merges:        usize,
    pub holds:         usize,
    pub wraps:         u64,
}

impl StepSummaryRow {
    pub fn new(step: u64, summary: &StepSummary) -> Self {
        Self {
            step,
            mean_velocity: summary.mean_velocity,
            flow_count:    summary.flow_count,
            lane_changes:  summary.report.lane_changes,
            merges:        summary.report.merges,
            holds:         summary.report.holds,
            wraps:         summary.report.wraps,
        }
    }
}

/// One lane of the grid at a snapshot step, as space-separated cell codes
/// (`-1` empty, `-2` closed, otherwise the velocity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneSnapshotRow {
    pub step:  u64,
    pub lane:  usize,
    pub cells: String,
}

impl LaneSnapshotRow {
    /// One row per lane of `grid`.
    pub fn from_grid(step: u64, grid: &Grid) -> Vec<Self> {
        (0..grid.n_lanes())
            .map(|lane| LaneSnapshotRow {
                step,
                lane,
                cells: grid
                    .lane(lane)
                    .iter()
                    .map(|c| c.code().to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            })
            .collect()
    }
}
