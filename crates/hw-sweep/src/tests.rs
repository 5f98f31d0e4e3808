//! Unit tests for hw-sweep.

use hw_core::{HighwayConfig, LaneChangeOdds};

/// One lane of 20 cells, no braking, no lane changes, no closures.
fn small_config() -> HighwayConfig {
    HighwayConfig {
        n_lanes:              1,
        lane_len:             20,
        max_velocity:         5,
        lane_density:         0.0,
        slowdown_probability: 0.0,
        lane_changes_enabled: false,
        lane_change_odds:     LaneChangeOdds::coupled(0.0),
        closures:             None,
    }
}

#[cfg(test)]
mod density_tests {
    use crate::{SweepError, densities};

    #[test]
    fn inclusive_of_stop() {
        let d = densities(0.0, 1.0, 0.25).unwrap();
        assert_eq!(d, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn hundredths_end_at_one() {
        let d = densities(0.0, 1.0, 0.01).unwrap();
        assert_eq!(d.len(), 101);
        assert!(d.iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert!((d[100] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bad_ranges_rejected() {
        assert!(matches!(densities(0.0, 1.0, 0.0), Err(SweepError::Range { .. })));
        assert!(matches!(densities(0.5, 0.1, 0.1), Err(SweepError::Range { .. })));
        assert!(matches!(densities(0.0, 1.0, f64::NAN), Err(SweepError::Range { .. })));
    }
}

#[cfg(test)]
mod measure_tests {
    use hw_core::{HighwayConfig, SimRng};
    use hw_rules::NoMerge;

    use super::small_config;
    use crate::Measure;

    #[test]
    fn empty_highway_has_no_mean_velocity() {
        let m = Measure::MeanVelocity { runs: 2, samples_per_run: 5 };
        let value = m.evaluate(&small_config(), NoMerge, &mut SimRng::new(1)).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn free_flow_velocity_within_limit() {
        let config = HighwayConfig { lane_density: 0.1, ..small_config() };
        let m = Measure::MeanVelocity { runs: 3, samples_per_run: 40 };
        let value = m.evaluate(&config, NoMerge, &mut SimRng::new(2)).unwrap().unwrap();
        assert!(value > 0.0 && value <= 5.0, "{value}");
    }

    #[test]
    fn jammed_lane_has_zero_flow() {
        let config = HighwayConfig { lane_density: 1.0, ..small_config() };
        let m = Measure::FlowRate { repeats: 3, steps: 20 };
        let value = m.evaluate(&config, NoMerge, &mut SimRng::new(3)).unwrap();
        assert_eq!(value, Some(0.0));
    }

    #[test]
    fn zero_repeats_is_none() {
        let m = Measure::FlowRate { repeats: 0, steps: 20 };
        assert_eq!(m.evaluate(&small_config(), NoMerge, &mut SimRng::new(3)).unwrap(), None);
    }
}

#[cfg(test)]
mod sweep_tests {
    use super::small_config;
    use crate::{Measure, ModelKind, Series, Sweep, SweepError};

    fn sweep(model: ModelKind) -> Sweep {
        Sweep {
            name:      "test".into(),
            model,
            series:    vec![Series::new("a", small_config()), Series::new("b", small_config())],
            densities: vec![0.0, 0.2, 0.5],
            measure:   Measure::FlowRate { repeats: 2, steps: 30 },
            seed:      7,
        }
    }

    #[test]
    fn rows_are_series_major() {
        let rows = sweep(ModelKind::Base).run().unwrap();
        assert_eq!(rows.len(), 6);
        let labels: Vec<_> = rows.iter().map(|r| r.series.as_str()).collect();
        assert_eq!(labels, ["a", "a", "a", "b", "b", "b"]);
        assert_eq!(rows[4].density, 0.2);
        assert_eq!(rows[0].measure, "flow_rate");
        assert_eq!(rows[0].value, Some(0.0));
    }

    #[test]
    fn same_seed_same_rows() {
        let s = sweep(ModelKind::Zipper);
        assert_eq!(s.run().unwrap(), s.run().unwrap());
    }

    #[test]
    fn point_matches_run() {
        let s = sweep(ModelKind::Base);
        let rows = s.run().unwrap();
        assert_eq!(s.point(5).unwrap(), rows[5]);
    }

    #[test]
    fn invalid_series_config_errors() {
        let mut s = sweep(ModelKind::Base);
        s.series[1].config.n_lanes = 0;
        assert!(s.run().is_err());
    }

    #[test]
    fn point_outside_sweep_errors() {
        let mut s = sweep(ModelKind::Zipper);
        assert!(matches!(s.point(6), Err(SweepError::PointIndex { index: 6, len: 6 })));

        s.densities.clear();
        assert!(s.is_empty());
        assert!(matches!(s.point(0), Err(SweepError::PointIndex { index: 0, len: 0 })));
        assert!(s.run().unwrap().is_empty());
    }
}

#[cfg(test)]
mod preset_tests {
    use crate::ModelKind;
    use crate::presets::*;

    #[test]
    fn preset_shapes() {
        let s = velocity_vs_density(0.1, 0).unwrap();
        assert_eq!(s.series.len(), 2);
        assert_eq!(s.densities.len(), 11);
        assert_eq!(s.series[0].config.slowdown_probability, 0.0);

        let s = flow_vs_density(0.5, 0).unwrap();
        let limits: Vec<_> = s.series.iter().map(|x| x.config.max_velocity).collect();
        assert_eq!(limits, [1, 3, 5]);

        let s = velocity_vs_speed_limit(ModelKind::Zipper, 0.5, 0).unwrap();
        assert!(s.series.iter().all(|x| x.config.n_lanes == 2 && x.config.n_blocked() == 1));
    }

    #[test]
    fn single_lane_series_has_no_closure() {
        let s = velocity_vs_density_lanes(ModelKind::Zipper, 0.5, 0).unwrap();
        let blocked: Vec<_> = s.series.iter().map(|x| x.config.n_blocked()).collect();
        assert_eq!(blocked, [0, 1, 1, 1]);

        let s = flow_vs_density_lanes(ModelKind::Base, 0.5, 0).unwrap();
        assert!(s.series.iter().all(|x| x.config.closures.is_none()));
        assert!(s.series.iter().all(|x| x.config.lane_changes_enabled));
    }

    #[test]
    fn presets_validate() {
        for model in [ModelKind::Base, ModelKind::Zipper] {
            let s = velocity_vs_density_lanes(model, 0.25, 0).unwrap();
            for series in &s.series {
                series.config.validate().unwrap();
            }
        }
    }
}

#[cfg(test)]
mod output_tests {
    use tempfile::TempDir;

    use super::small_config;
    use crate::{ModelKind, SweepRow, site_trace, write_rows};

    #[test]
    fn rows_serialize_with_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/rows.csv");
        let rows = vec![
            SweepRow {
                sweep:   "s".into(),
                model:   ModelKind::Zipper,
                series:  "N=2".into(),
                measure: "mean_velocity",
                density: 0.5,
                value:   Some(1.25),
            },
            SweepRow {
                sweep:   "s".into(),
                model:   ModelKind::Zipper,
                series:  "N=2".into(),
                measure: "mean_velocity",
                density: 0.0,
                value:   None,
            },
        ];
        write_rows(&path, &rows).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["sweep", "model", "series", "measure", "density", "value"]);
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][1], "zipper");
        assert_eq!(&records[0][5], "1.25");
        assert_eq!(&records[1][5], "");
    }

    #[test]
    fn site_trace_keeps_lane_occupancy() {
        let config = hw_core::HighwayConfig { lane_density: 0.25, ..small_config() };
        let trace = site_trace(config, 25, 4).unwrap();
        assert_eq!(trace.rows.len(), 25);
        let occupied = |row: &Vec<i32>| row.iter().filter(|&&c| c >= 0).count();
        assert!(trace.rows.iter().all(|row| row.len() == 20 && occupied(row) == 5));

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trace.csv");
        trace.write_csv(&path).unwrap();
        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.headers().unwrap().len(), 21);
        assert_eq!(rdr.records().count(), 25);
    }
}
