//! The standard experiments.
//!
//! Every preset starts from [`experiment_config`] (3 lanes of 200 cells,
//! speed limit 5, slowdown 0.5, no lane changes) and varies one parameter
//! per series:
//!
//! | Preset                        | Series                 | Measure        |
//! |-------------------------------|------------------------|----------------|
//! | [`velocity_vs_density`]       | p = 0.0, 0.5           | mean velocity  |
//! | [`flow_vs_density`]           | v_max = 1, 3, 5        | flow rate      |
//! | [`velocity_vs_density_lanes`] | N = 1, 2, 3, 4 lanes   | mean velocity  |
//! | [`velocity_vs_speed_limit`]   | v_max = 2, 4, 6, 8     | mean velocity  |
//! | [`flow_vs_density_lanes`]     | N = 1, 2, 3, 4 lanes   | flow rate      |
//!
//! The first two always drive the base model; the lane and speed-limit
//! presets take the model as a parameter and, for [`ModelKind::Zipper`],
//! close 20 % of one lane whenever there is more than one.

use hw_core::{ClosureConfig, HighwayConfig};

use crate::{Measure, ModelKind, Series, Sweep, SweepResult, densities};

/// Lane length used by every preset; flow runs last this many steps.
pub const EXPERIMENT_LANE_LEN: usize = 200;

const VELOCITY_SAMPLES: Measure = Measure::MeanVelocity { runs: 1, samples_per_run: 1_000 };
const FLOW_REPEATS: Measure = Measure::FlowRate { repeats: 100, steps: EXPERIMENT_LANE_LEN as u64 };

/// Shared starting point for the presets.
pub fn experiment_config() -> HighwayConfig {
    HighwayConfig {
        n_lanes:              3,
        lane_len:             EXPERIMENT_LANE_LEN,
        lane_density:         0.5,
        lane_changes_enabled: false,
        closures:             None,
        ..HighwayConfig::default()
    }
    .with_slowdown(0.5)
}

fn with_lanes(model: ModelKind, n_lanes: usize) -> HighwayConfig {
    let closures = match model {
        ModelKind::Zipper if n_lanes > 1 => Some(ClosureConfig { n_blocked: 1, portion_blocked: 0.2 }),
        _ => None,
    };
    HighwayConfig { n_lanes, lane_changes_enabled: true, closures, ..experiment_config() }
}

pub fn velocity_vs_density(delta: f64, seed: u64) -> SweepResult<Sweep> {
    let series = [0.0, 0.5]
        .into_iter()
        .map(|p| Series::new(format!("p={p:.1}"), experiment_config().with_slowdown(p)))
        .collect();
    Ok(Sweep {
        name: "velocity_vs_density".into(),
        model: ModelKind::Base,
        series,
        densities: densities(0.0, 1.0, delta)?,
        measure: Measure::MeanVelocity { runs: 1, samples_per_run: 2_000 },
        seed,
    })
}

pub fn flow_vs_density(delta: f64, seed: u64) -> SweepResult<Sweep> {
    let series = [1, 3, 5]
        .into_iter()
        .map(|v| Series::new(format!("v_max={v}"), HighwayConfig { max_velocity: v, ..experiment_config() }))
        .collect();
    Ok(Sweep {
        name: "flow_vs_density".into(),
        model: ModelKind::Base,
        series,
        densities: densities(0.0, 1.0, delta)?,
        measure: FLOW_REPEATS,
        seed,
    })
}

pub fn velocity_vs_density_lanes(model: ModelKind, delta: f64, seed: u64) -> SweepResult<Sweep> {
    let series = (1..=4).map(|n| Series::new(format!("N={n}"), with_lanes(model, n))).collect();
    Ok(Sweep {
        name: "velocity_vs_density_lanes".into(),
        model,
        series,
        densities: densities(0.01, 1.0, delta)?,
        measure: VELOCITY_SAMPLES,
        seed,
    })
}

pub fn velocity_vs_speed_limit(model: ModelKind, delta: f64, seed: u64) -> SweepResult<Sweep> {
    let series = [2, 4, 6, 8]
        .into_iter()
        .map(|v| {
            let config = HighwayConfig { max_velocity: v, ..with_lanes(model, 2) };
            Series::new(format!("v_max={v}"), config)
        })
        .collect();
    Ok(Sweep {
        name: "velocity_vs_speed_limit".into(),
        model,
        series,
        densities: densities(0.01, 1.0, delta)?,
        measure: VELOCITY_SAMPLES,
        seed,
    })
}

pub fn flow_vs_density_lanes(model: ModelKind, delta: f64, seed: u64) -> SweepResult<Sweep> {
    let series = (1..=4).map(|n| Series::new(format!("N={n}"), with_lanes(model, n))).collect();
    Ok(Sweep {
        name: "flow_vs_density_lanes".into(),
        model,
        series,
        densities: densities(delta, 1.0, delta)?,
        measure: FLOW_REPEATS,
        seed,
    })
}
