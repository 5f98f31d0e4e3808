//! `hw-sim` — step engine and simulation facade for the highway_ca framework.
//!
//! # Three-phase step
//!
//! ```text
//! for step in 0..run.total_steps:
//!   ① Lane changes: (if enabled, n_lanes > 1) decide every switch against
//!                    the grid as it enters the step, then apply them.
//!   ② Velocities:   safe velocity from the gap ahead, then random braking.
//!                    Vehicles whose target lies in a closure are held.
//!   ③ Positions:    unheld vehicles advance `v` cells (counting wraps);
//!                    held vehicles go through the MergePolicy.
//! ```
//!
//! Each phase reads an immutable grid and writes a fresh one, so no vehicle
//! ever sees a neighbour's update from the same phase.
//!
//! # Quick-start
//!
//! ```rust
//! use hw_core::{HighwayConfig, RunConfig};
//! use hw_sim::{HighwayBuilder, NoopObserver};
//!
//! let mut highway = HighwayBuilder::zipper(HighwayConfig::default(), RunConfig::new(50, 42))
//!     .build()?;
//! highway.run(&mut NoopObserver);
//! println!("mean velocity {:?}, flow {}", highway.highway_velocity(), highway.flow_count());
//! # Ok::<(), hw_sim::SimError>(())
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::HighwayBuilder;
pub use engine::{StepEngine, StepReport, VelocityPhase};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, StepObserver, StepSummary};
pub use sim::{BaseHighway, Highway, ZipperHighway};
