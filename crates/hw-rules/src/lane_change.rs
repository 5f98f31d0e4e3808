//! Lane changes: one lane over, same position, same velocity.
//!
//! A vehicle at `(lane, pos)` may switch to `target = lane ± 1` when, in the
//! pre-step snapshot:
//!
//! 1. `target` exists (lanes never wrap) and `(target, pos)` is `Empty`;
//! 2. its safe velocity in `target` is not lower than in `lane`;
//! 3. the nearest vehicle behind it in `target` would not run into it.
//!
//! Two random draws bracket the checks: a gate draw decides whether the
//! vehicle is considered at all, and a commit draw confirms a switch that
//! passed every check.  The direction is a fair coin flip.

use hw_core::{Cell, Direction, LaneChangeOdds, SimRng, Velocity};
use hw_grid::{GapAnalyzer, Grid};

/// One applied switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaneChange {
    pub pos:       usize,
    pub from_lane: usize,
    pub to_lane:   usize,
    pub velocity:  Velocity,
}

#[derive(Clone, Debug)]
pub struct LaneChangePolicy {
    odds:         LaneChangeOdds,
    max_velocity: Velocity,
}

impl LaneChangePolicy {
    pub fn new(odds: LaneChangeOdds, max_velocity: Velocity) -> Self {
        Self { odds, max_velocity }
    }

    #[inline]
    pub fn odds(&self) -> LaneChangeOdds {
        self.odds
    }

    /// The lane the vehicle at `(lane, pos)` may switch to in direction
    /// `dir`, or `None` if the switch is illegal or not worth it.
    ///
    /// Deterministic: reads only `snapshot`.
    pub fn evaluate(&self, snapshot: &Grid, lane: usize, pos: usize, dir: Direction) -> Option<usize> {
        let v = snapshot.cell_at(lane, pos).velocity()?;
        let target = dir.apply(lane, snapshot.n_lanes())?;
        if !snapshot.cell_at(target, pos).is_empty() {
            return None;
        }

        let gap = GapAnalyzer::new(snapshot, self.max_velocity);
        let here = gap.safe_velocity_as(v, lane, pos);
        let there = gap.safe_velocity_as(v, target, pos);
        if there < here {
            return None;
        }
        if gap.endangers_follower(target, pos) {
            return None;
        }
        Some(target)
    }

    /// Run the lane-change phase: every decision reads `snapshot`, every
    /// write goes to the returned grid.
    ///
    /// Vehicles are visited lane-major; the first vehicle to claim a target
    /// cell keeps it.
    pub fn apply(&self, snapshot: &Grid, rng: &mut SimRng) -> (Grid, Vec<LaneChange>) {
        let mut next = snapshot.snapshot();
        let mut changes = Vec::new();
        if snapshot.n_lanes() < 2 {
            return (next, changes);
        }

        let mut claimed = vec![false; snapshot.cells().len()];
        for (lane, pos, velocity) in snapshot.vehicles() {
            if !rng.gen_bool(self.odds.consider) {
                continue;
            }
            let dir = if rng.gen_bool(0.5) { Direction::Left } else { Direction::Right };
            let Some(to_lane) = self.evaluate(snapshot, lane, pos, dir) else {
                continue;
            };
            let target = snapshot.index(to_lane, pos);
            if claimed[target] || !rng.gen_bool(self.odds.commit) {
                continue;
            }

            claimed[target] = true;
            next.set_cell(lane, pos, Cell::Empty);
            next.set_cell(to_lane, pos, Cell::Occupied(velocity));
            changes.push(LaneChange { pos, from_lane: lane, to_lane, velocity });
        }
        (next, changes)
    }
}
