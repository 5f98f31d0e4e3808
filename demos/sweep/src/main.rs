//! sweep — run the standard highway_ca experiments and write CSV tables.
//!
//! ```text
//! sweep velocity-density            --delta 0.01
//! sweep flow-density                --delta 0.01
//! sweep velocity-lanes   --model zipper
//! sweep speed-limit      --model base
//! sweep flow-lanes       --model zipper --delta 0.05
//! sweep site-trace       --steps 200
//! sweep all
//! ```
//!
//! Each experiment writes `<out>/<name>.csv` (`<name>_<model>.csv` for the
//! model-parameterised ones).  Points run in parallel on `--threads` workers.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hw_sweep::presets::{self, experiment_config};
use hw_sweep::{ModelKind, Sweep, SweepResult, site_trace, write_rows};

#[derive(Debug, Parser)]
#[command(name = "sweep", about = "Density sweeps for the highway_ca traffic automaton")]
struct Cli {
    /// Directory the CSV tables are written to.
    #[arg(long, default_value = "output/sweeps", global = true)]
    out: PathBuf,

    /// Root seed; every point derives its own seed from it.
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Worker threads (defaults to all cores).
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    experiment: Experiment,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Model {
    Base,
    Zipper,
}

impl From<Model> for ModelKind {
    fn from(model: Model) -> Self {
        match model {
            Model::Base => ModelKind::Base,
            Model::Zipper => ModelKind::Zipper,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Experiment {
    /// Mean velocity against density for p = 0.0 and p = 0.5.
    VelocityDensity {
        #[arg(long, default_value_t = 0.01)]
        delta: f64,
    },
    /// Flow rate against density for speed limits 1, 3, 5.
    FlowDensity {
        #[arg(long, default_value_t = 0.01)]
        delta: f64,
    },
    /// Mean velocity against density for 1 to 4 lanes.
    VelocityLanes {
        #[arg(long, value_enum, default_value = "base")]
        model: Model,
        #[arg(long, default_value_t = 0.01)]
        delta: f64,
    },
    /// Mean velocity against density for speed limits 2, 4, 6, 8 on two lanes.
    SpeedLimit {
        #[arg(long, value_enum, default_value = "base")]
        model: Model,
        #[arg(long, default_value_t = 0.01)]
        delta: f64,
    },
    /// Flow rate against density for 1 to 4 lanes.
    FlowLanes {
        #[arg(long, value_enum, default_value = "base")]
        model: Model,
        #[arg(long, default_value_t = 0.05)]
        delta: f64,
    },
    /// Lane-0 cells after every step of one run.
    SiteTrace {
        #[arg(long, default_value_t = 200)]
        steps: u64,
    },
    /// Every experiment above, both models where applicable.
    All {
        #[arg(long, default_value_t = 0.05)]
        delta: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker pool")?;
    }
    info!(threads = rayon::current_num_threads(), out = %cli.out.display(), "sweep runner");

    let seed = cli.seed;
    let started = Instant::now();
    match cli.experiment {
        Experiment::VelocityDensity { delta } => {
            run(&cli.out, "velocity_vs_density", presets::velocity_vs_density(delta, seed))?
        }
        Experiment::FlowDensity { delta } => {
            run(&cli.out, "flow_vs_density", presets::flow_vs_density(delta, seed))?
        }
        Experiment::VelocityLanes { model, delta } => {
            let kind = model.into();
            run(&cli.out, &named("velocity_vs_density_lanes", kind), presets::velocity_vs_density_lanes(kind, delta, seed))?
        }
        Experiment::SpeedLimit { model, delta } => {
            let kind = model.into();
            run(&cli.out, &named("velocity_vs_speed_limit", kind), presets::velocity_vs_speed_limit(kind, delta, seed))?
        }
        Experiment::FlowLanes { model, delta } => {
            let kind = model.into();
            run(&cli.out, &named("flow_vs_density_lanes", kind), presets::flow_vs_density_lanes(kind, delta, seed))?
        }
        Experiment::SiteTrace { steps } => trace(&cli.out, steps, seed)?,
        Experiment::All { delta } => {
            run(&cli.out, "velocity_vs_density", presets::velocity_vs_density(delta, seed))?;
            run(&cli.out, "flow_vs_density", presets::flow_vs_density(delta, seed))?;
            trace(&cli.out, 200, seed)?;
            for kind in [ModelKind::Base, ModelKind::Zipper] {
                run(&cli.out, &named("velocity_vs_density_lanes", kind), presets::velocity_vs_density_lanes(kind, delta, seed))?;
                run(&cli.out, &named("velocity_vs_speed_limit", kind), presets::velocity_vs_speed_limit(kind, delta, seed))?;
                run(&cli.out, &named("flow_vs_density_lanes", kind), presets::flow_vs_density_lanes(kind, delta, seed))?;
            }
        }
    }
    println!("Done in {:.2?}", started.elapsed());
    Ok(())
}

fn named(base: &str, kind: ModelKind) -> String {
    match kind {
        ModelKind::Base => format!("{base}_base"),
        ModelKind::Zipper => format!("{base}_zipper"),
    }
}

fn run(out: &Path, name: &str, sweep: SweepResult<Sweep>) -> Result<()> {
    let sweep = sweep.with_context(|| format!("building sweep {name}"))?;
    let started = Instant::now();
    let rows = sweep.run().with_context(|| format!("running sweep {name}"))?;
    let path = out.join(format!("{name}.csv"));
    write_rows(&path, &rows).with_context(|| format!("writing {}", path.display()))?;
    println!("{name}: {} points in {:.2?} -> {}", rows.len(), started.elapsed(), path.display());
    Ok(())
}

fn trace(out: &Path, steps: u64, seed: u64) -> Result<()> {
    let trace = site_trace(experiment_config(), steps, seed)?;
    let path = out.join("site_trace.csv");
    trace.write_csv(&path).with_context(|| format!("writing {}", path.display()))?;
    println!("site_trace: {steps} steps of lane {} -> {}", trace.lane, path.display());
    Ok(())
}
