//! zipper — a three-lane ring road with one construction zone.
//!
//! Prints the highway after each of the first steps so the queue in front of
//! the closure and the merges into the neighbouring lane are visible:
//!
//! ```text
//! .  empty      #  closed      0-9  vehicle velocity
//! ```
//!
//! Then runs the remaining steps with CSV output into `./output/zipper`
//! (override with the first command-line argument).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hw_core::{ClosureConfig, HighwayConfig, RunConfig, Step};
use hw_grid::Grid;
use hw_output::{CsvWriter, HighwayOutputObserver};
use hw_sim::{HighwayBuilder, StepObserver, StepSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                  u64   = 42;
const LANE_LEN:              usize = 60;
const PRINTED_STEPS:         u64   = 12;
const TOTAL_STEPS:           u64   = 500;
const OUTPUT_INTERVAL_STEPS: u64   = 50;

// ── Progress observer ─────────────────────────────────────────────────────────

/// Forwards to the CSV observer and tallies merges for the final report.
struct TallyObserver<O: StepObserver> {
    inner:  O,
    merges: usize,
    holds:  usize,
}

impl<O: StepObserver> StepObserver for TallyObserver<O> {
    fn on_step_end(&mut self, step: Step, summary: &StepSummary) {
        self.merges += summary.report.merges;
        self.holds += summary.report.holds;
        self.inner.on_step_end(step, summary);
    }

    fn on_snapshot(&mut self, step: Step, grid: &Grid) {
        info!(%step, vehicles = grid.vehicle_count(), "snapshot");
        self.inner.on_snapshot(step, grid);
    }

    fn on_run_end(&mut self, final_step: Step) {
        self.inner.on_run_end(final_step);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out_dir = std::env::args().nth(1).map_or_else(|| PathBuf::from("output/zipper"), PathBuf::from);

    let config = HighwayConfig {
        n_lanes:      3,
        lane_len:     LANE_LEN,
        lane_density: 0.25,
        closures:     Some(ClosureConfig { n_blocked: 1, portion_blocked: 0.2 }),
        ..HighwayConfig::default()
    };
    let run = RunConfig { total_steps: TOTAL_STEPS, seed: SEED, output_interval_steps: OUTPUT_INTERVAL_STEPS };

    println!("=== zipper: highway_ca lane-closure demo ===");
    println!(
        "Lanes: {}  |  Length: {}  |  v_max: {}  |  Density: {}  |  Seed: {SEED}",
        config.n_lanes, config.lane_len, config.max_velocity, config.lane_density
    );

    let mut highway = HighwayBuilder::zipper(config, run).build()?;
    for closure in highway.blockages().closures() {
        println!("Closure: lane {} from {} for {} cells", closure.lane, closure.start, closure.len);
    }
    println!();
    println!("{}", highway.grid());

    for _ in 0..PRINTED_STEPS {
        highway.simulate();
        let report = highway.last_report();
        println!(
            "{}  changes {}  merges {}  holds {}",
            highway.current_step(),
            report.lane_changes,
            report.merges,
            report.holds
        );
        println!("{}", highway.grid());
    }

    let writer = CsvWriter::new(&out_dir)?;
    let mut obs = TallyObserver { inner: HighwayOutputObserver::new(writer), merges: 0, holds: 0 };

    let started = Instant::now();
    highway.run(&mut obs);
    if let Some(e) = obs.inner.take_error() {
        return Err(e.into());
    }

    println!("Ran {} steps in {:.2?}", highway.current_step().0, started.elapsed());
    match highway.highway_velocity() {
        Some(v) => println!("Mean velocity: {v:.3}"),
        None => println!("Mean velocity: n/a (empty highway)"),
    }
    println!("Flow: {} wraps, {:.3} per step", highway.flow_count(), highway.flow_rate());
    println!("Merges: {}  |  Hold-steps: {}", obs.merges, obs.holds);
    println!("Output written to {}", out_dir.display());
    Ok(())
}
