//! The state of one highway cell.
//!
//! External consumers (plotting, animation, CSV) see the grid as integers:
//!
//! | Code              | Cell               |
//! |-------------------|--------------------|
//! | `-1`              | `Empty`            |
//! | `-2`              | `Blocked`          |
//! | `0..=max_velocity`| `Occupied(v)`      |

use std::fmt;

use crate::{HwError, HwResult};

/// Vehicle velocity in cells per step.
pub type Velocity = u32;

/// One position in one lane.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    /// Part of a lane closure.  Never changes after initialization.
    Blocked,
    /// A vehicle travelling at the given velocity.
    Occupied(Velocity),
}

impl Cell {
    pub const EMPTY_CODE: i32 = -1;
    pub const BLOCKED_CODE: i32 = -2;

    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is_blocked(self) -> bool {
        matches!(self, Cell::Blocked)
    }

    #[inline]
    pub fn is_vehicle(self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    /// The occupant's velocity, or `None` for empty and blocked cells.
    #[inline]
    pub fn velocity(self) -> Option<Velocity> {
        match self {
            Cell::Occupied(v) => Some(v),
            _ => None,
        }
    }

    /// Integer encoding used by raw grid exports.
    #[inline]
    pub fn code(self) -> i32 {
        match self {
            Cell::Empty => Self::EMPTY_CODE,
            Cell::Blocked => Self::BLOCKED_CODE,
            Cell::Occupied(v) => i32::try_from(v).unwrap_or(i32::MAX),
        }
    }

    /// Decode one raw integer.  Any negative code other than `-1`/`-2` is
    /// rejected.
    pub fn from_code(code: i32) -> HwResult<Cell> {
        match code {
            Self::EMPTY_CODE => Ok(Cell::Empty),
            Self::BLOCKED_CODE => Ok(Cell::Blocked),
            v if v >= 0 => Ok(Cell::Occupied(v as Velocity)),
            other => Err(HwError::InvalidCellCode(other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str("."),
            Cell::Blocked => f.write_str("#"),
            Cell::Occupied(v) if *v < 10 => write!(f, "{v}"),
            Cell::Occupied(_) => f.write_str("+"),
        }
    }
}
