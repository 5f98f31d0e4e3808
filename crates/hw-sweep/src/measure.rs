//! What a sweep point measures.

use hw_core::{HighwayConfig, RunConfig, SimRng};
use hw_rules::MergePolicy;
use hw_sim::{HighwayBuilder, NoopObserver};

use crate::SweepResult;

/// Per-point measurement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Measure {
    /// Build `runs` fresh highways, step each `samples_per_run` times, and
    /// average `highway_velocity()` over every post-step sample.  Samples
    /// taken on an empty highway are skipped.
    MeanVelocity { runs: usize, samples_per_run: usize },

    /// Build `repeats` fresh highways, run each for `steps` steps, and
    /// average `flow_count / steps`.
    FlowRate { repeats: usize, steps: u64 },
}

impl Measure {
    /// Evaluate on highways built from `config` and `policy`.
    ///
    /// Each highway gets its own child of `rng`.  Returns `None` when no
    /// sample was available (an empty highway under `MeanVelocity`, or zero
    /// repeats).
    pub fn evaluate<P: MergePolicy + Copy>(
        &self,
        config: &HighwayConfig,
        policy: P,
        rng:    &mut SimRng,
    ) -> SweepResult<Option<f64>> {
        match *self {
            Measure::MeanVelocity { runs, samples_per_run } => {
                let mut sum = 0.0;
                let mut count = 0usize;
                for run in 0..runs {
                    let mut highway =
                        HighwayBuilder::new(config.clone(), RunConfig::new(samples_per_run as u64, 0), policy)
                            .rng(rng.child(run as u64))
                            .build()?;
                    for _ in 0..samples_per_run {
                        highway.simulate();
                        if let Some(v) = highway.highway_velocity() {
                            sum += v;
                            count += 1;
                        }
                    }
                }
                Ok((count > 0).then(|| sum / count as f64))
            }
            Measure::FlowRate { repeats, steps } => {
                if repeats == 0 {
                    return Ok(None);
                }
                let mut sum = 0.0;
                for repeat in 0..repeats {
                    let mut highway = HighwayBuilder::new(config.clone(), RunConfig::new(steps, 0), policy)
                        .rng(rng.child(repeat as u64))
                        .build()?;
                    highway.run(&mut NoopObserver);
                    sum += highway.flow_rate();
                }
                Ok(Some(sum / repeats as f64))
            }
        }
    }

    /// Column label for this measure in output tables.
    pub fn name(&self) -> &'static str {
        match self {
            Measure::MeanVelocity { .. } => "mean_velocity",
            Measure::FlowRate { .. } => "flow_rate",
        }
    }
}
