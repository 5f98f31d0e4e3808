//! The `Highway` facade and its step loop.

use hw_core::{HighwayConfig, RunConfig, SimRng, Step};
use hw_grid::{Blockages, Grid};
use hw_rules::{MergePolicy, NoMerge, ZipperMerge};

use crate::{StepEngine, StepObserver, StepReport, StepSummary};

/// The base Nagel–Schreckenberg highway.
pub type BaseHighway = Highway<NoMerge>;

/// The lane-closure variant with zipper merging.
pub type ZipperHighway = Highway<ZipperMerge>;

/// One simulated highway.
///
/// Owns its grid, closures, RNG, and flow counter exclusively; independent
/// instances share nothing and may run on different threads.
///
/// Create via [`HighwayBuilder`][crate::HighwayBuilder].
pub struct Highway<P: MergePolicy> {
    pub(crate) config:      HighwayConfig,
    pub(crate) run:         RunConfig,
    pub(crate) clock:       Step,
    pub(crate) grid:        Grid,
    pub(crate) blockages:   Blockages,
    pub(crate) engine:      StepEngine<P>,
    pub(crate) rng:         SimRng,
    pub(crate) flow_count:  u64,
    pub(crate) last_report: StepReport,
}

impl<P: MergePolicy> Highway<P> {
    // ── Stepping ──────────────────────────────────────────────────────────

    /// Execute one step.
    pub fn simulate(&mut self) {
        let (next, report) = self.engine.step(&self.grid, &mut self.rng);
        self.grid = next;
        self.flow_count += report.wraps;
        self.last_report = report;
        self.clock = self.clock.next();
    }

    /// Run from the current step to `run.end_step()`.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: StepObserver>(&mut self, observer: &mut O) {
        while self.clock < self.run.end_step() {
            self.observed_step(observer);
        }
        observer.on_run_end(self.clock);
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`).
    pub fn run_steps<O: StepObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_step(observer);
        }
    }

    fn observed_step<O: StepObserver>(&mut self, observer: &mut O) {
        let now = self.clock;
        observer.on_step_start(now);
        self.simulate();
        observer.on_step_end(now, &self.summary());
        if self.run.wants_snapshot(now) {
            observer.on_snapshot(now, &self.grid);
        }
    }

    // ── Metrics ───────────────────────────────────────────────────────────

    /// Mean velocity of each lane's vehicles; `None` for lanes without any.
    pub fn lane_velocities(&self) -> Vec<Option<f64>> {
        (0..self.grid.n_lanes()).map(|lane| self.grid.lane_mean_velocity(lane)).collect()
    }

    /// Mean of the per-lane mean velocities over lanes that carry vehicles.
    ///
    /// Empty lanes are left out rather than counted as 0; `None` when the
    /// whole highway is empty.
    pub fn highway_velocity(&self) -> Option<f64> {
        let means: Vec<f64> = self.lane_velocities().into_iter().flatten().collect();
        if means.is_empty() {
            return None;
        }
        Some(means.iter().sum::<f64>() / means.len() as f64)
    }

    /// Vehicles that have wrapped around their lane since construction.
    #[inline]
    pub fn flow_count(&self) -> u64 {
        self.flow_count
    }

    /// Average wraps per executed step; 0 before the first step.
    pub fn flow_rate(&self) -> f64 {
        if self.clock == Step::ZERO {
            return 0.0;
        }
        self.flow_count as f64 / self.clock.0 as f64
    }

    pub fn summary(&self) -> StepSummary {
        StepSummary {
            report:        self.last_report,
            mean_velocity: self.highway_velocity(),
            flow_count:    self.flow_count,
        }
    }

    // ── Read-only state ───────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Lane-major integer cells: `-1` empty, `-2` closed, `v` vehicle.
    pub fn raw_grid(&self) -> Vec<i32> {
        self.grid.to_raw()
    }

    #[inline]
    pub fn blockages(&self) -> &Blockages {
        &self.blockages
    }

    #[inline]
    pub fn config(&self) -> &HighwayConfig {
        &self.config
    }

    #[inline]
    pub fn run_config(&self) -> &RunConfig {
        &self.run
    }

    /// Steps executed so far.
    #[inline]
    pub fn current_step(&self) -> Step {
        self.clock
    }

    #[inline]
    pub fn last_report(&self) -> StepReport {
        self.last_report
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.grid.vehicle_count()
    }
}
