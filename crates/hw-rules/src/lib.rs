//! `hw-rules` — the per-vehicle decisions the step engine delegates.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                    |
//! |-------------------|-------------------------------------------------------------|
//! | [`lane_change`]   | `LaneChangePolicy`: legal, beneficial lateral switches      |
//! | [`merge`]         | `MergePolicy` trait, `NoMerge`, `ZipperMerge`               |
//!
//! # Design notes
//!
//! Both rules follow the same read/write split as the engine phases:
//!
//! 1. **Decide** against an immutable snapshot (`&Grid`) so that no vehicle
//!    sees a neighbour's decision from the same phase.
//!
//! 2. **Write** into a separate output grid, claiming target cells in
//!    lane-major order so two vehicles can never land on the same cell.
//!
//! `MergePolicy` is the seam between the base model and the zipper variant:
//! the engine is generic over it and never branches on the variant itself.

pub mod lane_change;
pub mod merge;


pub use lane_change::{LaneChange, LaneChangePolicy};
pub use merge::{Fallback, MergePolicy, NoMerge, ZipperMerge};
