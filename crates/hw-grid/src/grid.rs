//! The highway cell array.
//!
//! Cells are stored lane-major in one flat `Vec<Cell>`:
//!
//! ```ignore
//! let cell = grid.cells[lane * grid.lane_len() + pos];
//! ```
//!
//! Every lane is a ring: positions are taken modulo `lane_len` on read and
//! write, so `cell_at(lane, lane_len)` is the same cell as `cell_at(lane, 0)`.
//! Lanes themselves never wrap; a lane index `>= n_lanes` is a caller bug and
//! panics like any out-of-bounds slice access.

use std::fmt;

use hw_core::{Cell, HwError, HwResult, Velocity};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    n_lanes:  usize,
    lane_len: usize,
    cells:    Vec<Cell>,
}

impl Grid {
    /// An all-`Empty` grid.
    pub fn new(n_lanes: usize, lane_len: usize) -> Self {
        Self {
            n_lanes,
            lane_len,
            cells: vec![Cell::Empty; n_lanes * lane_len],
        }
    }

    /// Decode a lane-major raw array (`-1` empty, `-2` blocked, `v >= 0`
    /// vehicle).
    pub fn from_raw(n_lanes: usize, lane_len: usize, raw: &[i32]) -> HwResult<Self> {
        let expected = n_lanes * lane_len;
        if raw.len() != expected {
            return Err(HwError::GridShape { expected, got: raw.len() });
        }
        let cells = raw
            .iter()
            .map(|&code| Cell::from_code(code))
            .collect::<HwResult<Vec<_>>>()?;
        Ok(Self { n_lanes, lane_len, cells })
    }

    /// Lane-major raw encoding for plotting and export.
    pub fn to_raw(&self) -> Vec<i32> {
        self.cells.iter().map(|c| c.code()).collect()
    }

    #[inline]
    pub fn n_lanes(&self) -> usize {
        self.n_lanes
    }

    #[inline]
    pub fn lane_len(&self) -> usize {
        self.lane_len
    }

    /// Reduce `pos` onto the ring.
    #[inline]
    pub fn wrap(&self, pos: usize) -> usize {
        pos % self.lane_len
    }

    /// Flat index of `(lane, pos)`; `pos` is wrapped.
    #[inline]
    pub fn index(&self, lane: usize, pos: usize) -> usize {
        debug_assert!(lane < self.n_lanes, "lane {lane} out of range");
        lane * self.lane_len + self.wrap(pos)
    }

    #[inline]
    pub fn cell_at(&self, lane: usize, pos: usize) -> Cell {
        self.cells[self.index(lane, pos)]
    }

    /// Overwrite one cell.  Closure cells are permanent; writing over one is
    /// an engine bug.
    #[inline]
    pub fn set_cell(&mut self, lane: usize, pos: usize, cell: Cell) {
        let i = self.index(lane, pos);
        debug_assert!(
            !self.cells[i].is_blocked() || cell.is_blocked(),
            "write over closure cell ({lane}, {pos})"
        );
        self.cells[i] = cell;
    }

    #[inline]
    pub fn is_blocked(&self, lane: usize, pos: usize) -> bool {
        self.cell_at(lane, pos).is_blocked()
    }

    /// Deep copy used as the read basis of one phase.
    #[inline]
    pub fn snapshot(&self) -> Grid {
        self.clone()
    }

    /// A grid of the same shape holding only this grid's closure cells.
    pub fn closures_only(&self) -> Grid {
        let cells = self
            .cells
            .iter()
            .map(|&c| if c.is_blocked() { Cell::Blocked } else { Cell::Empty })
            .collect();
        Grid { n_lanes: self.n_lanes, lane_len: self.lane_len, cells }
    }

    /// All cells of one lane, positions `0..lane_len`.
    #[inline]
    pub fn lane(&self, lane: usize) -> &[Cell] {
        let start = lane * self.lane_len;
        &self.cells[start..start + self.lane_len]
    }

    /// All cells, lane-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every vehicle as `(lane, pos, velocity)`, lane-major.
    pub fn vehicles(&self) -> impl Iterator<Item = (usize, usize, Velocity)> + '_ {
        let lane_len = self.lane_len;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.velocity().map(|v| (i / lane_len, i % lane_len, v)))
    }

    pub fn vehicle_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_vehicle()).count()
    }

    pub fn lane_vehicle_count(&self, lane: usize) -> usize {
        self.lane(lane).iter().filter(|c| c.is_vehicle()).count()
    }

    pub fn blocked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_blocked()).count()
    }

    /// Mean velocity of the vehicles in `lane`; `None` if it has none.
    pub fn lane_mean_velocity(&self, lane: usize) -> Option<f64> {
        let (sum, n) = self
            .lane(lane)
            .iter()
            .filter_map(|c| c.velocity())
            .fold((0u64, 0usize), |(s, n), v| (s + u64::from(v), n + 1));
        (n > 0).then(|| sum as f64 / n as f64)
    }
}

impl fmt::Display for Grid {
    /// One text row per lane: `.` empty, `#` closed, digit = velocity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for lane in 0..self.n_lanes {
            for cell in self.lane(lane) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
