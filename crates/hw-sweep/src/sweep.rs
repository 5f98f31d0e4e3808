//! Sweep definition and driver.

use hw_core::{HighwayConfig, SimRng};
use hw_rules::{NoMerge, ZipperMerge};
use serde::Serialize;
use tracing::{debug, info};

use crate::{Measure, SweepError, SweepResult};

// ── densities ─────────────────────────────────────────────────────────────────

/// Evenly spaced densities `start, start + delta, …` up to and including
/// `stop` (within rounding).  Values never exceed `stop`.
pub fn densities(start: f64, stop: f64, delta: f64) -> SweepResult<Vec<f64>> {
    let valid = delta > 0.0 && start <= stop && stop.is_finite();
    if !valid {
        return Err(SweepError::Range { start, stop, delta });
    }
    let n = ((stop - start) / delta + 1e-9).floor() as usize + 1;
    Ok((0..n).map(|i| (start + i as f64 * delta).min(stop)).collect())
}

// ── ModelKind / Series ────────────────────────────────────────────────────────

/// Which step engine a sweep drives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Closures are plain obstacles.
    Base,
    /// Vehicles wait at closures and zipper-merge.
    Zipper,
}

/// One labelled curve of a sweep: a configuration whose `lane_density` is
/// overwritten at every point.
#[derive(Clone, Debug)]
pub struct Series {
    pub label:  String,
    pub config: HighwayConfig,
}

impl Series {
    pub fn new(label: impl Into<String>, config: HighwayConfig) -> Self {
        Self { label: label.into(), config }
    }
}

// ── SweepRow ──────────────────────────────────────────────────────────────────

/// One measured point.  `value` is empty in CSV output when no sample existed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepRow {
    pub sweep:   String,
    pub model:   ModelKind,
    pub series:  String,
    pub measure: &'static str,
    pub density: f64,
    pub value:   Option<f64>,
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Sweep {
    pub name:      String,
    pub model:     ModelKind,
    pub series:    Vec<Series>,
    pub densities: Vec<f64>,
    pub measure:   Measure,
    /// Root seed; point `i` (series-major) is seeded with
    /// `SimRng::derive(seed, i)`.
    pub seed:      u64,
}

impl Sweep {
    /// Number of `(series, density)` points.
    #[inline]
    pub fn len(&self) -> usize {
        self.series.len() * self.densities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Measure every point, series-major.
    ///
    /// With the `parallel` feature points run on the Rayon global pool; the
    /// rows and their order are the same either way.
    pub fn run(&self) -> SweepResult<Vec<SweepRow>> {
        info!(
            sweep = %self.name,
            model = ?self.model,
            series = self.series.len(),
            points = self.len(),
            measure = self.measure.name(),
            "sweep started"
        );

        #[cfg(not(feature = "parallel"))]
        let rows = (0..self.len()).map(|i| self.point(i)).collect::<SweepResult<Vec<_>>>()?;

        #[cfg(feature = "parallel")]
        let rows = {
            use rayon::prelude::*;
            (0..self.len()).into_par_iter().map(|i| self.point(i)).collect::<SweepResult<Vec<_>>>()?
        };

        for series in &self.series {
            let values: Vec<f64> =
                rows.iter().filter(|r| r.series == series.label).filter_map(|r| r.value).collect();
            let peak = values.iter().copied().fold(f64::NAN, f64::max);
            info!(sweep = %self.name, series = %series.label, peak, "series done");
        }
        Ok(rows)
    }

    /// Measure point `index` (series-major).  Errors when `index >= self.len()`,
    /// which includes every index of a sweep without densities.
    pub fn point(&self, index: usize) -> SweepResult<SweepRow> {
        if index >= self.len() {
            return Err(SweepError::PointIndex { index, len: self.len() });
        }
        let series = &self.series[index / self.densities.len()];
        let density = self.densities[index % self.densities.len()];

        let mut config = series.config.clone();
        config.lane_density = density;
        let mut rng = SimRng::derive(self.seed, index as u64);

        let value = match self.model {
            ModelKind::Base => self.measure.evaluate(&config, NoMerge, &mut rng)?,
            ModelKind::Zipper => self.measure.evaluate(&config, ZipperMerge, &mut rng)?,
        };
        debug!(series = %series.label, density, ?value, "point");

        Ok(SweepRow {
            sweep: self.name.clone(),
            model: self.model,
            series: series.label.clone(),
            measure: self.measure.name(),
            density,
            value,
        })
    }
}
