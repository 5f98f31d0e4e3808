//! Gap analysis: distances to the nearest obstacle and the collision-free
//! velocity rule.
//!
//! # The velocity rule
//!
//! For a vehicle with velocity `v` whose nearest obstacle ahead is `d` cells
//! away:
//!
//! ```text
//! d <= v + 1        → d - 1   (accelerating would reach the obstacle)
//! v <  max_velocity → v + 1   (free acceleration)
//! otherwise         → v
//! ```
//!
//! Both vehicles and closure cells are obstacles; a closure behaves like a
//! vehicle standing still.  Scans are bounded by `lane_len`: a vehicle alone
//! in its lane sees itself `lane_len` cells ahead.

use hw_core::{Cell, Velocity};

use crate::Grid;

/// What a scan ran into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    Vehicle(Velocity),
    Closure,
    /// Nothing else in the lane; the scan came back to its own cell.
    Itself,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Obstacle {
    /// Cells between the scan origin and the obstacle, in `1..=lane_len`.
    pub distance: usize,
    pub kind:     ObstacleKind,
}

impl Obstacle {
    #[inline]
    pub fn is_closure(&self) -> bool {
        self.kind == ObstacleKind::Closure
    }
}

/// Apply the velocity rule to a vehicle travelling at `v` with `gap` free
/// cells ahead plus one (the distance to the obstacle).
#[inline]
pub fn safe_velocity_from(v: Velocity, gap: usize, max_velocity: Velocity) -> Velocity {
    let d = Velocity::try_from(gap).unwrap_or(Velocity::MAX);
    if d <= v.saturating_add(1) {
        d.saturating_sub(1)
    } else if v < max_velocity {
        v + 1
    } else {
        v
    }
}

/// Read-only queries over one grid.
#[derive(Copy, Clone)]
pub struct GapAnalyzer<'g> {
    grid:         &'g Grid,
    max_velocity: Velocity,
}

impl<'g> GapAnalyzer<'g> {
    pub fn new(grid: &'g Grid, max_velocity: Velocity) -> Self {
        Self { grid, max_velocity }
    }

    /// Nearest non-empty cell ahead of `pos` in `lane`.
    pub fn forward_obstacle(&self, lane: usize, pos: usize) -> Obstacle {
        let lane_len = self.grid.lane_len();
        for distance in 1..lane_len {
            if let Some(kind) = obstacle_kind(self.grid.cell_at(lane, pos + distance)) {
                return Obstacle { distance, kind };
            }
        }
        Obstacle { distance: lane_len, kind: ObstacleKind::Itself }
    }

    /// Nearest non-empty cell behind `pos` in `lane`.
    pub fn backward_obstacle(&self, lane: usize, pos: usize) -> Obstacle {
        let lane_len = self.grid.lane_len();
        let pos = self.grid.wrap(pos);
        for distance in 1..lane_len {
            let behind = (pos + lane_len - distance) % lane_len;
            if let Some(kind) = obstacle_kind(self.grid.cell_at(lane, behind)) {
                return Obstacle { distance, kind };
            }
        }
        Obstacle { distance: lane_len, kind: ObstacleKind::Itself }
    }

    /// Distance from `pos` to the next vehicle or closure ahead.
    #[inline]
    pub fn forward_gap(&self, lane: usize, pos: usize) -> usize {
        self.forward_obstacle(lane, pos).distance
    }

    /// Next-step velocity of the vehicle at `(lane, pos)`; `None` when the
    /// cell holds no vehicle.
    pub fn safe_velocity(&self, lane: usize, pos: usize) -> Option<Velocity> {
        let v = self.grid.cell_at(lane, pos).velocity()?;
        Some(safe_velocity_from(v, self.forward_gap(lane, pos), self.max_velocity))
    }

    /// Velocity a vehicle travelling at `v` would get if it stood at
    /// `(lane, pos)`, whatever the cell currently holds.
    pub fn safe_velocity_as(&self, v: Velocity, lane: usize, pos: usize) -> Velocity {
        safe_velocity_from(v, self.forward_gap(lane, pos), self.max_velocity)
    }

    /// Whether the vehicle at `(lane, pos)` would, at its next safe velocity,
    /// reach a vehicle inserted `distance` cells ahead of it.
    ///
    /// An empty or closed cell never collides.
    pub fn would_collide(&self, lane: usize, pos: usize, distance: usize) -> bool {
        match self.safe_velocity(lane, pos) {
            Some(next) => distance <= next as usize,
            None => false,
        }
    }

    /// Whether a vehicle dropped into `(lane, pos)` would be run into by the
    /// nearest vehicle behind it.
    pub fn endangers_follower(&self, lane: usize, pos: usize) -> bool {
        let behind = self.backward_obstacle(lane, pos);
        match behind.kind {
            ObstacleKind::Vehicle(_) => {
                let follower = self.grid.wrap(pos + self.grid.lane_len() - behind.distance);
                self.would_collide(lane, follower, behind.distance)
            }
            ObstacleKind::Closure | ObstacleKind::Itself => false,
        }
    }
}

#[inline]
fn obstacle_kind(cell: Cell) -> Option<ObstacleKind> {
    match cell {
        Cell::Empty => None,
        Cell::Blocked => Some(ObstacleKind::Closure),
        Cell::Occupied(v) => Some(ObstacleKind::Vehicle(v)),
    }
}
