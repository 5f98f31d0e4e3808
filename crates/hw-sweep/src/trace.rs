//! Space–time trace of one lane.

use hw_core::{HighwayConfig, RunConfig};
use hw_sim::HighwayBuilder;

use crate::SweepResult;

/// Raw cell codes of one lane after each step (`-1` empty, `-2` closed,
/// otherwise the velocity).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteTrace {
    pub lane: usize,
    /// `rows[k]` is the lane after step `k + 1`.
    pub rows: Vec<Vec<i32>>,
}

/// Run a base-model highway for `steps` steps and record lane 0.
pub fn site_trace(config: HighwayConfig, steps: u64, seed: u64) -> SweepResult<SiteTrace> {
    let mut highway = HighwayBuilder::base(config, RunConfig::new(steps, seed)).build()?;
    let mut rows = Vec::with_capacity(steps as usize);
    for _ in 0..steps {
        highway.simulate();
        rows.push(highway.grid().lane(0).iter().map(|c| c.code()).collect());
    }
    Ok(SiteTrace { lane: 0, rows })
}
