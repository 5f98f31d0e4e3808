//! Fluent builder for the initial highway grid.
//!
//! # Usage
//!
//! ```rust
//! use hw_core::{ClosureConfig, SimRng};
//! use hw_grid::{Blockages, GridBuilder};
//!
//! let mut rng = SimRng::new(42);
//! let closures = ClosureConfig { n_blocked: 1, portion_blocked: 0.2 };
//! let blockages = Blockages::random(&closures, 3, 100, &mut rng);
//!
//! let grid = GridBuilder::new(3, 100)
//!     .blockages(&blockages)
//!     .populate(0.3, 5, &mut rng)
//!     .build();
//!
//! assert_eq!(grid.blocked_count(), 20);
//! assert!(grid.vehicle_count() > 0);
//! ```
//!
//! Closures must be applied before `populate` so that vehicles are only
//! placed on open cells.

use hw_core::{Cell, SimRng, Velocity};

use crate::{Blockages, Grid};

pub struct GridBuilder {
    grid: Grid,
}

impl GridBuilder {
    pub fn new(n_lanes: usize, lane_len: usize) -> Self {
        Self { grid: Grid::new(n_lanes, lane_len) }
    }

    /// Mark every closure cell `Blocked`.
    pub fn blockages(mut self, blockages: &Blockages) -> Self {
        blockages.apply(&mut self.grid);
        self
    }

    /// Fill each lane's open cells to `density` with vehicles of uniformly
    /// random velocity in `0..=max_velocity`.
    ///
    /// Each lane receives `floor(density * open_cells)` vehicles, and at
    /// least one whenever `density > 0` and the lane has an open cell.
    /// Cells that already hold a vehicle count as taken.
    pub fn populate(mut self, density: f64, max_velocity: Velocity, rng: &mut SimRng) -> Self {
        for lane in 0..self.grid.n_lanes() {
            let open: Vec<usize> = self
                .grid
                .lane(lane)
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_empty())
                .map(|(pos, _)| pos)
                .collect();

            let target = vehicles_for(density, open.len());
            for i in rng.sample_indices(open.len(), target) {
                let v = rng.gen_range(0..=max_velocity);
                self.grid.set_cell(lane, open[i], Cell::Occupied(v));
            }
        }
        self
    }

    pub fn build(self) -> Grid {
        self.grid
    }
}

/// Vehicle count for a lane with `open` free cells.
fn vehicles_for(density: f64, open: usize) -> usize {
    let n = (density * open as f64).floor() as usize;
    if density > 0.0 && open > 0 { n.clamp(1, open) } else { 0 }
}
