//! Construction zones: permanent `Blocked` ranges in selected lanes.
//!
//! A closure is one contiguous run of cells on the lane ring, so a closure
//! that starts near the end of a lane continues at position 0.

use hw_core::{Cell, ClosureConfig, SimRng};

use crate::Grid;

/// One closed range: `len` cells of `lane` starting at `start`, wrapping.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Closure {
    pub lane:  usize,
    pub start: usize,
    pub len:   usize,
}

impl Closure {
    /// Positions covered by this closure, in driving order.
    pub fn positions(&self, lane_len: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).map(move |k| (self.start + k) % lane_len)
    }

    pub fn covers(&self, lane: usize, pos: usize, lane_len: usize) -> bool {
        if lane != self.lane || self.len == 0 {
            return false;
        }
        let offset = (pos % lane_len + lane_len - self.start % lane_len) % lane_len;
        offset < self.len
    }
}

/// The immutable set of closures of one highway.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blockages {
    closures: Vec<Closure>,
}

impl Blockages {
    /// No closures (base model).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_closures(mut closures: Vec<Closure>) -> Self {
        closures.sort_by_key(|c| c.lane);
        Self { closures }
    }

    /// Close `config.n_blocked` distinct random lanes, each over
    /// `config.blocked_len(lane_len)` cells starting at a random position.
    ///
    /// `n_blocked` must already be validated against `n_lanes`.
    pub fn random(config: &ClosureConfig, n_lanes: usize, lane_len: usize, rng: &mut SimRng) -> Self {
        let len = config.blocked_len(lane_len);
        let closures = rng
            .sample_indices(n_lanes, config.n_blocked)
            .into_iter()
            .map(|lane| Closure { lane, start: rng.gen_range(0..lane_len), len })
            .collect();
        Self::from_closures(closures)
    }

    /// Recover closures from the `Blocked` cells of an existing grid, one
    /// closure per maximal run.
    pub fn from_grid(grid: &Grid) -> Self {
        let lane_len = grid.lane_len();
        let mut closures = Vec::new();
        for lane in 0..grid.n_lanes() {
            let cells = grid.lane(lane);
            if cells.iter().all(|c| c.is_blocked()) {
                closures.push(Closure { lane, start: 0, len: lane_len });
                continue;
            }
            for pos in 0..lane_len {
                let prev = (pos + lane_len - 1) % lane_len;
                if !cells[pos].is_blocked() || cells[prev].is_blocked() {
                    continue;
                }
                let len = (0..lane_len)
                    .take_while(|k| cells[(pos + k) % lane_len].is_blocked())
                    .count();
                closures.push(Closure { lane, start: pos, len });
            }
        }
        Self { closures }
    }

    /// Write every closure into `grid` as `Blocked` cells.
    pub fn apply(&self, grid: &mut Grid) {
        let lane_len = grid.lane_len();
        for closure in &self.closures {
            for pos in closure.positions(lane_len) {
                grid.set_cell(closure.lane, pos, Cell::Blocked);
            }
        }
    }

    pub fn closures(&self) -> &[Closure] {
        &self.closures
    }

    pub fn is_empty(&self) -> bool {
        self.closures.iter().all(|c| c.len == 0)
    }

    /// Distinct lanes carrying at least one closure.
    pub fn closed_lanes(&self) -> Vec<usize> {
        let mut lanes: Vec<usize> = self.closures.iter().map(|c| c.lane).collect();
        lanes.dedup();
        lanes
    }

    pub fn covers(&self, lane: usize, pos: usize, lane_len: usize) -> bool {
        self.closures.iter().any(|c| c.covers(lane, pos, lane_len))
    }
}
