//! Highway configuration.
//!
//! # Defaults
//!
//! `HighwayConfig::default()` is the reference setup the sweeps start from:
//! three lanes of 100 cells, speed limit 5, 30 % density, slowdown
//! probability 0.5, lane changes enabled, one lane with a 20 % closure.

use crate::{HwError, HwResult, Velocity};

// ── LaneChangeOdds ────────────────────────────────────────────────────────────

/// The two independent draws that gate a lane change.
///
/// A vehicle is *considered* with probability `consider`; a switch that passes
/// every legality check is *committed* with probability `commit`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneChangeOdds {
    pub consider: f64,
    pub commit:   f64,
}

impl LaneChangeOdds {
    /// Odds tied to the slowdown probability `p`: considered with `1 - p`,
    /// committed with `p`.
    pub fn coupled(p: f64) -> Self {
        Self { consider: 1.0 - p, commit: p }
    }

    /// Every legal, beneficial switch happens.
    pub fn always() -> Self {
        Self { consider: 1.0, commit: 1.0 }
    }

    pub fn validate(&self) -> HwResult<()> {
        unit_range("lane change consider probability", self.consider)?;
        unit_range("lane change commit probability", self.commit)
    }
}

// ── ClosureConfig ─────────────────────────────────────────────────────────────

/// Construction-zone setup for the zipper-merge variant.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureConfig {
    /// How many distinct lanes carry a closure.  Must be `<= n_lanes`.
    pub n_blocked: usize,
    /// Fraction of each closed lane that is blocked, in `[0, 1]`.
    pub portion_blocked: f64,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self { n_blocked: 1, portion_blocked: 0.2 }
    }
}

impl ClosureConfig {
    /// Number of blocked cells in each closed lane of length `lane_len`.
    #[inline]
    pub fn blocked_len(&self, lane_len: usize) -> usize {
        ((self.portion_blocked * lane_len as f64).floor() as usize).min(lane_len)
    }
}

// ── HighwayConfig ─────────────────────────────────────────────────────────────

/// Top-level model configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighwayConfig {
    pub n_lanes:  usize,
    pub lane_len: usize,

    /// Speed limit in cells per step.
    pub max_velocity: Velocity,

    /// Target fraction of non-blocked cells occupied at construction.
    pub lane_density: f64,

    /// Probability that a moving vehicle brakes by one unit each step.
    pub slowdown_probability: f64,

    pub lane_changes_enabled: bool,
    pub lane_change_odds:     LaneChangeOdds,

    /// `None` for the base model; `Some` for the zipper-merge variant.
    pub closures: Option<ClosureConfig>,
}

impl Default for HighwayConfig {
    fn default() -> Self {
        Self {
            n_lanes:              3,
            lane_len:             100,
            max_velocity:         5,
            lane_density:         0.3,
            slowdown_probability: 0.5,
            lane_changes_enabled: true,
            lane_change_odds:     LaneChangeOdds::coupled(0.5),
            closures:             Some(ClosureConfig::default()),
        }
    }
}

impl HighwayConfig {
    /// Set the slowdown probability and re-couple the lane-change odds to it.
    pub fn with_slowdown(mut self, p: f64) -> Self {
        self.slowdown_probability = p;
        self.lane_change_odds = LaneChangeOdds::coupled(p);
        self
    }

    /// Total number of cells (`n_lanes * lane_len`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.n_lanes * self.lane_len
    }

    /// Closed lanes requested by this configuration (0 for the base model).
    #[inline]
    pub fn n_blocked(&self) -> usize {
        self.closures.map_or(0, |c| c.n_blocked)
    }

    /// Reject configurations that cannot produce a physical highway.
    pub fn validate(&self) -> HwResult<()> {
        if self.n_lanes == 0 {
            return Err(HwError::Config("n_lanes must be at least 1".into()));
        }
        if self.lane_len == 0 {
            return Err(HwError::Config("lane_len must be at least 1".into()));
        }
        unit_range("lane_density", self.lane_density)?;
        unit_range("slowdown_probability", self.slowdown_probability)?;
        self.lane_change_odds.validate()?;

        if let Some(closures) = &self.closures {
            if closures.n_blocked > self.n_lanes {
                return Err(HwError::TooManyBlockedLanes {
                    n_blocked: closures.n_blocked,
                    n_lanes:   self.n_lanes,
                });
            }
            unit_range("portion_blocked", closures.portion_blocked)?;
        }
        Ok(())
    }
}

fn unit_range(name: &'static str, value: f64) -> HwResult<()> {
    // NaN fails both comparisons and is rejected here too.
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(HwError::OutOfUnitRange { name, value })
    }
}
