//! `hw-core` — foundational types for the `highway_ca` traffic automaton.
//!
//! This crate is a dependency of every other `hw-*` crate.  It intentionally
//! has no `hw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`cell`]        | `Cell`, `Velocity`, raw integer encoding              |
//! | [`direction`]   | `Direction` (one lane left / right)                   |
//! | [`config`]      | `HighwayConfig`, `ClosureConfig`, `LaneChangeOdds`    |
//! | [`time`]        | `Step`, `RunConfig`                                   |
//! | [`rng`]         | `SimRng` (per-instance, seedable)                     |
//! | [`error`]       | `HwError`, `HwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to cells and config types.  |

pub mod cell;
pub mod config;
pub mod direction;
pub mod error;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, Velocity};
pub use config::{ClosureConfig, HighwayConfig, LaneChangeOdds};
pub use direction::Direction;
pub use error::{HwError, HwResult};
pub use rng::SimRng;
pub use time::{RunConfig, Step};
