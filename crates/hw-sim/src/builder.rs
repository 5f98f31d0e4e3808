//! Fluent builder for constructing a [`Highway`].

use hw_core::{HighwayConfig, RunConfig, SimRng, Step};
use hw_grid::{Blockages, Grid, GridBuilder};
use hw_rules::{MergePolicy, NoMerge, ZipperMerge};
use tracing::debug;

use crate::{Highway, SimError, SimResult, StepEngine, StepReport};

/// Fluent builder for [`Highway<P>`].
///
/// # Required inputs
///
/// - [`HighwayConfig`]: lanes, length, speed limit, densities, closures
/// - [`RunConfig`]: total steps, seed, snapshot interval
/// - `P: MergePolicy`: [`NoMerge`] or [`ZipperMerge`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                          |
/// |----------------------|--------------------------------------------------|
/// | `.initial_grid(g)`   | Random closures, then random vehicles            |
/// | `.rng(r)`            | `SimRng::new(run.seed)`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut highway = HighwayBuilder::zipper(config, RunConfig::new(200, seed))
///     .build()?;
/// highway.run(&mut NoopObserver);
/// ```
pub struct HighwayBuilder<P: MergePolicy> {
    config: HighwayConfig,
    run:    RunConfig,
    policy: P,
    grid:   Option<Grid>,
    rng:    Option<SimRng>,
}

impl HighwayBuilder<NoMerge> {
    /// Base model: closures, if any, are plain obstacles.
    pub fn base(config: HighwayConfig, run: RunConfig) -> Self {
        Self::new(config, run, NoMerge)
    }
}

impl HighwayBuilder<ZipperMerge> {
    /// Lane-closure model with zipper merging.
    pub fn zipper(config: HighwayConfig, run: RunConfig) -> Self {
        Self::new(config, run, ZipperMerge)
    }
}

impl<P: MergePolicy> HighwayBuilder<P> {
    /// Create a builder with all required inputs.
    pub fn new(config: HighwayConfig, run: RunConfig, policy: P) -> Self {
        Self { config, run, policy, grid: None, rng: None }
    }

    /// Start from a caller-supplied grid instead of random placement.
    ///
    /// Its `Blocked` cells become the highway's closures; the configured
    /// closures and density are not applied.
    pub fn initial_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Use a caller-supplied generator instead of seeding from `run.seed`.
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate inputs, lay out closures and vehicles, and return a
    /// ready-to-run [`Highway`].
    pub fn build(self) -> SimResult<Highway<P>> {
        self.config.validate()?;
        let config = self.config;
        let mut rng = self.rng.unwrap_or_else(|| SimRng::new(self.run.seed));

        let (grid, blockages) = match self.grid {
            Some(grid) => {
                check_grid(&config, &grid)?;
                let blockages = Blockages::from_grid(&grid);
                (grid, blockages)
            }
            None => {
                // Closures go down before vehicles so no vehicle starts inside one.
                let blockages = match &config.closures {
                    Some(closures) => {
                        Blockages::random(closures, config.n_lanes, config.lane_len, &mut rng)
                    }
                    None => Blockages::none(),
                };
                let grid = GridBuilder::new(config.n_lanes, config.lane_len)
                    .blockages(&blockages)
                    .populate(config.lane_density, config.max_velocity, &mut rng)
                    .build();
                (grid, blockages)
            }
        };

        debug!(
            n_lanes = config.n_lanes,
            lane_len = config.lane_len,
            closed_lanes = blockages.closed_lanes().len(),
            blocked_cells = grid.blocked_count(),
            vehicles = grid.vehicle_count(),
            "highway built"
        );

        Ok(Highway {
            engine:      StepEngine::new(&config, self.policy),
            config,
            run:         self.run,
            clock:       Step::ZERO,
            grid,
            blockages,
            rng,
            flow_count:  0,
            last_report: StepReport::default(),
        })
    }
}

fn check_grid(config: &HighwayConfig, grid: &Grid) -> SimResult<()> {
    if grid.n_lanes() != config.n_lanes || grid.lane_len() != config.lane_len {
        return Err(SimError::GridShape {
            n_lanes:   config.n_lanes,
            lane_len:  config.lane_len,
            got_lanes: grid.n_lanes(),
            got_len:   grid.lane_len(),
        });
    }
    if let Some((lane, pos, velocity)) = grid.vehicles().find(|&(_, _, v)| v > config.max_velocity) {
        return Err(SimError::VelocityAboveLimit { lane, pos, velocity, max: config.max_velocity });
    }
    Ok(())
}
