//! `hw-grid` — the cell array every other component reads and writes.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`grid`]        | `Grid` (lane-major `Vec<Cell>`, circular positions)       |
//! | [`blockage`]    | `Closure`, `Blockages` (construction zones)               |
//! | [`gap`]         | `GapAnalyzer`, `Obstacle`, `safe_velocity_from`           |
//! | [`builder`]     | `GridBuilder` (closures first, then random vehicles)      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Grid` and closures.  |

pub mod blockage;
pub mod builder;
pub mod gap;
pub mod grid;

#[cfg(test)]
mod tests;

pub use blockage::{Blockages, Closure};
pub use builder::GridBuilder;
pub use gap::{GapAnalyzer, Obstacle, ObstacleKind, safe_velocity_from};
pub use grid::Grid;
