//! The step engine: one automaton update as three snapshot-isolated phases.

use hw_core::{Cell, HighwayConfig, SimRng, Velocity};
use hw_grid::{GapAnalyzer, Grid, safe_velocity_from};
use hw_rules::{Fallback, LaneChangePolicy, MergePolicy};
use tracing::trace;

// ── StepReport ────────────────────────────────────────────────────────────────

/// What happened during one step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Vehicles that switched lanes in the lane-change phase.
    pub lane_changes: usize,
    /// Held vehicles that merged around a closure.
    pub merges: usize,
    /// Held vehicles left waiting in front of a closure.
    pub holds: usize,
    /// Vehicles whose advance crossed the end of their lane.
    pub wraps: u64,
    /// Vehicles on the highway after the step.
    pub vehicles: usize,
}

// ── VelocityPhase ─────────────────────────────────────────────────────────────

/// Output of the velocity phase: new velocities plus the closure-hold mask.
#[derive(Clone, Debug)]
pub struct VelocityPhase {
    pub grid: Grid,
    /// Indexed like `grid.cells()`; `true` where a vehicle's unobstructed
    /// target cell lies in a closure.
    pub held: Vec<bool>,
}

impl VelocityPhase {
    #[inline]
    pub fn is_held(&self, lane: usize, pos: usize) -> bool {
        self.held[self.grid.index(lane, pos)]
    }
}

// ── StepEngine ────────────────────────────────────────────────────────────────

/// Runs the lane-change, velocity, and position phases.
///
/// `P` decides what happens to vehicles held by a closure; see
/// [`hw_rules::MergePolicy`].  The engine owns no grid and no RNG, so one
/// engine can drive any number of highways with the same parameters.
#[derive(Clone, Debug)]
pub struct StepEngine<P: MergePolicy> {
    policy:               P,
    max_velocity:         Velocity,
    slowdown_probability: f64,
    lane_changes:         Option<LaneChangePolicy>,
}

impl<P: MergePolicy> StepEngine<P> {
    pub fn new(config: &HighwayConfig, policy: P) -> Self {
        let lane_changes = (config.lane_changes_enabled && config.n_lanes > 1)
            .then(|| LaneChangePolicy::new(config.lane_change_odds, config.max_velocity));
        Self {
            policy,
            max_velocity: config.max_velocity,
            slowdown_probability: config.slowdown_probability,
            lane_changes,
        }
    }

    #[inline]
    pub fn lane_changes_enabled(&self) -> bool {
        self.lane_changes.is_some()
    }

    /// Advance `grid` by one step.
    pub fn step(&self, grid: &Grid, rng: &mut SimRng) -> (Grid, StepReport) {
        let (after_changes, lane_changes) = self.lane_change_phase(grid, rng);
        let velocities = self.velocity_phase(&after_changes, rng);
        let (next, mut report) = self.position_phase(&velocities);
        report.lane_changes = lane_changes;

        trace!(
            lane_changes = report.lane_changes,
            merges = report.merges,
            holds = report.holds,
            wraps = report.wraps,
            vehicles = report.vehicles,
            "step"
        );
        (next, report)
    }

    /// Phase ①.  Returns the new grid and the number of switches.
    pub fn lane_change_phase(&self, grid: &Grid, rng: &mut SimRng) -> (Grid, usize) {
        match &self.lane_changes {
            Some(policy) => {
                let (next, changes) = policy.apply(grid, rng);
                (next, changes.len())
            }
            None => (grid.snapshot(), 0),
        }
    }

    /// Phase ②.  Every vehicle takes its safe velocity, then brakes by one
    /// with probability `slowdown_probability` if it is moving.
    pub fn velocity_phase(&self, grid: &Grid, rng: &mut SimRng) -> VelocityPhase {
        let gap = GapAnalyzer::new(grid, self.max_velocity);
        let mut next = grid.snapshot();
        let mut held = vec![false; grid.cells().len()];

        for (lane, pos, v) in grid.vehicles() {
            let ahead = gap.forward_obstacle(lane, pos);
            let mut safe = safe_velocity_from(v, ahead.distance, self.max_velocity);
            // Held only when the unobstructed target `pos + v` is closed, or when
            // a stopped vehicle stands right in front of the closure.
            if ahead.is_closure() && ahead.distance <= (v as usize).max(1) {
                held[grid.index(lane, pos)] = true;
            }
            if safe >= 1 && rng.gen_bool(self.slowdown_probability) {
                safe -= 1;
            }
            next.set_cell(lane, pos, Cell::Occupied(safe));
        }

        VelocityPhase { grid: next, held }
    }

    /// Phase ③.  Unheld vehicles move first; held vehicles are then placed at
    /// their fallback cell and offered a merge against the complete grid.
    pub fn position_phase(&self, phase: &VelocityPhase) -> (Grid, StepReport) {
        let src = &phase.grid;
        let mut next = src.closures_only();
        let mut report = StepReport::default();
        let mut held = Vec::new();

        for (lane, pos, v) in src.vehicles() {
            if phase.is_held(lane, pos) {
                held.push((lane, pos, v));
            } else {
                self.advance(&mut next, lane, pos, v, &mut report);
            }
        }

        // Fallback placement for every held vehicle before any merge, so each
        // merge check sees where everyone actually is.
        let fallback = self.policy.fallback();
        let parked: Vec<(usize, usize, Velocity)> = held
            .into_iter()
            .map(|(lane, pos, v)| match fallback {
                Fallback::Advance => (lane, self.advance(&mut next, lane, pos, v, &mut report), v),
                Fallback::Hold => {
                    next.set_cell(lane, pos, Cell::Occupied(0));
                    (lane, pos, v)
                }
            })
            .collect();

        for (lane, pos, v) in parked {
            match self.policy.merge_target(&next, lane, pos, self.max_velocity) {
                Some(target) => {
                    debug_assert!(next.cell_at(target, pos).is_empty());
                    next.set_cell(lane, pos, Cell::Empty);
                    next.set_cell(target, pos, Cell::Occupied(v.max(1).min(self.max_velocity)));
                    report.merges += 1;
                }
                None if fallback == Fallback::Hold => report.holds += 1,
                None => {}
            }
        }

        report.vehicles = next.vehicle_count();
        debug_assert_eq!(report.vehicles, src.vehicle_count(), "vehicles created or destroyed");
        (next, report)
    }

    /// Move one vehicle `v` cells along its lane; returns the new position.
    fn advance(&self, next: &mut Grid, lane: usize, pos: usize, v: Velocity, report: &mut StepReport) -> usize {
        let target = pos + v as usize;
        if target >= next.lane_len() {
            report.wraps += 1;
        }
        let dest = next.wrap(target);
        debug_assert!(next.cell_at(lane, dest).is_empty(), "collision at ({lane}, {dest})");
        next.set_cell(lane, dest, Cell::Occupied(v));
        dest
    }
}
