//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `step_summaries.csv`
//! - `lane_snapshots.csv`
//!
//! An empty highway has no mean velocity; its `mean_velocity` field is left
//! blank rather than written as 0.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{LaneSnapshotRow, OutputResult, StepSummaryRow};

pub const SUMMARY_HEADER: [&str; 7] =
    ["step", "mean_velocity", "flow_count", "lane_changes", "merges", "holds", "wraps"];

pub const SNAPSHOT_HEADER: [&str; 3] = ["step", "lane", "cells"];

/// Writes run output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the two CSV files, and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("lane_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        Ok(Self { summaries, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.mean_velocity.map(|v| v.to_string()).unwrap_or_default(),
            row.flow_count.to_string(),
            row.lane_changes.to_string(),
            row.merges.to_string(),
            row.holds.to_string(),
            row.wraps.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, rows: &[LaneSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[row.step.to_string(), row.lane.to_string(), row.cells.clone()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
