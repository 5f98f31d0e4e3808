//! `hw-sweep` — experiment drivers for the highway_ca framework.
//!
//! A [`Sweep`] runs one measurement at every `(series, density)` point, each
//! on fresh, independently seeded highways:
//!
//! ```text
//! for series in sweep.series:          // e.g. p = 0.0, p = 0.5
//!   for density in sweep.densities:    // e.g. 0.00, 0.01, …, 1.00
//!     value = measure(fresh highways)  // mean velocity or flow rate
//! ```
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`sweep`]     | `Sweep`, `Series`, `ModelKind`, `SweepRow`, `densities`|
//! | [`measure`]   | `Measure` and the per-point measurement loops          |
//! | [`presets`]   | The standard velocity / flow experiments               |
//! | [`trace`]     | Lane-0 space–time trace                                |
//! | [`output`]    | CSV writers for sweep rows and traces                  |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Sweep points run on the Rayon global thread pool.       |

pub mod error;
pub mod measure;
pub mod output;
pub mod presets;
pub mod sweep;
pub mod trace;

#[cfg(test)]
mod tests;

pub use error::{SweepError, SweepResult};
pub use measure::Measure;
pub use output::write_rows;
pub use sweep::{ModelKind, Series, Sweep, SweepRow, densities};
pub use trace::{SiteTrace, site_trace};
