//! `hw-output` — run output writers for the highway_ca framework.
//!
//! | Backend | Files created                                     |
//! |---------|---------------------------------------------------|
//! | CSV     | `step_summaries.csv`, `lane_snapshots.csv`        |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`HighwayOutputObserver`], which implements `hw_sim::StepObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hw_output::{CsvWriter, HighwayOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = HighwayOutputObserver::new(writer);
//! highway.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::HighwayOutputObserver;
pub use row::{LaneSnapshotRow, StepSummaryRow};
pub use writer::OutputWriter;
