//! What happens to a vehicle whose advance is capped by a lane closure.
//!
//! The velocity phase marks a vehicle *held* when its nearest obstacle is a
//! closure and its unobstructed target lies inside it (`d <= max(v, 1)`,
//! with `v` the velocity entering the step).  The position
//! phase places every other vehicle first, then hands each held vehicle to the
//! engine's `MergePolicy`:
//!
//! - [`Fallback`] decides where the vehicle sits if it does not merge;
//! - [`MergePolicy::merge_target`] may then pick an adjacent lane at the same
//!   position, judged against the fully placed grid.

use hw_core::{Direction, Velocity};
use hw_grid::{GapAnalyzer, Grid};

/// Where a held vehicle ends up when no merge happens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Move forward by its safe velocity, which already stops short of the
    /// closure.
    Advance,
    /// Stay at the current position with velocity 0 and wait for a gap.
    Hold,
}

/// Pluggable blocked-destination handling.
///
/// The step engine is generic over this trait, so the base model and the
/// zipper variant share one engine.  Implementations must be stateless across
/// steps; all state lives in the grid.
pub trait MergePolicy: Send + Sync + 'static {
    fn fallback(&self) -> Fallback;

    /// Lane the held vehicle at `(lane, pos)` should merge into, or `None` to
    /// keep the fallback placement.
    ///
    /// `placed` already contains every vehicle of the step, including this one
    /// at its fallback cell.  Default: never merge.
    fn merge_target(
        &self,
        _placed:       &Grid,
        _lane:         usize,
        _pos:          usize,
        _max_velocity: Velocity,
    ) -> Option<usize> {
        None
    }
}

/// Base model: closures are plain obstacles and nobody merges.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoMerge;

impl MergePolicy for NoMerge {
    fn fallback(&self) -> Fallback {
        Fallback::Advance
    }
}

/// Zipper merge: a vehicle stuck behind a closure waits in place and slides
/// into the first adjacent lane (right, then left) whose cell at the same
/// position is free and whose follower would not run into it.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZipperMerge;

impl MergePolicy for ZipperMerge {
    fn fallback(&self) -> Fallback {
        Fallback::Hold
    }

    fn merge_target(
        &self,
        placed:       &Grid,
        lane:         usize,
        pos:          usize,
        max_velocity: Velocity,
    ) -> Option<usize> {
        let gap = GapAnalyzer::new(placed, max_velocity);
        Direction::MERGE_ORDER
            .iter()
            .filter_map(|dir| dir.apply(lane, placed.n_lanes()))
            .find(|&target| {
                placed.cell_at(target, pos).is_empty() && !gap.endangers_follower(target, pos)
            })
    }
}
