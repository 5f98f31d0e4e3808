//! Lateral movement between adjacent lanes.

/// One lane towards lane 0 (`Left`) or towards lane `n_lanes - 1` (`Right`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Both directions, in the order lateral merges try them.
    pub const MERGE_ORDER: [Direction; 2] = [Direction::Right, Direction::Left];

    /// The neighbouring lane, or `None` if it falls outside `[0, n_lanes)`.
    /// Lanes never wrap.
    #[inline]
    pub fn apply(self, lane: usize, n_lanes: usize) -> Option<usize> {
        match self {
            Direction::Left => lane.checked_sub(1),
            Direction::Right => Some(lane + 1).filter(|&l| l < n_lanes),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
