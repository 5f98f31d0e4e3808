//! Unit tests for hw-core primitives.

#[cfg(test)]
mod cell {
    use crate::{Cell, HwError};

    #[test]
    fn codes_roundtrip() {
        for cell in [Cell::Empty, Cell::Blocked, Cell::Occupied(0), Cell::Occupied(5)] {
            assert_eq!(Cell::from_code(cell.code()).unwrap(), cell);
        }
        assert_eq!(Cell::Empty.code(), -1);
        assert_eq!(Cell::Blocked.code(), -2);
        assert_eq!(Cell::Occupied(3).code(), 3);
    }

    #[test]
    fn unknown_negative_code_rejected() {
        assert!(matches!(Cell::from_code(-3), Err(HwError::InvalidCellCode(-3))));
    }

    #[test]
    fn predicates() {
        assert!(Cell::Empty.is_empty());
        assert!(Cell::Blocked.is_blocked());
        assert!(Cell::Occupied(0).is_vehicle());
        assert_eq!(Cell::Occupied(4).velocity(), Some(4));
        assert_eq!(Cell::Blocked.velocity(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Cell::Empty.to_string(), ".");
        assert_eq!(Cell::Blocked.to_string(), "#");
        assert_eq!(Cell::Occupied(7).to_string(), "7");
        assert_eq!(Cell::Occupied(12).to_string(), "+");
    }
}

#[cfg(test)]
mod direction {
    use crate::Direction;

    #[test]
    fn lanes_do_not_wrap() {
        assert_eq!(Direction::Left.apply(0, 3), None);
        assert_eq!(Direction::Left.apply(2, 3), Some(1));
        assert_eq!(Direction::Right.apply(2, 3), None);
        assert_eq!(Direction::Right.apply(0, 3), Some(1));
        assert_eq!(Direction::Right.apply(0, 1), None);
    }

    #[test]
    fn opposite() {
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }
}

#[cfg(test)]
mod config {
    use crate::{ClosureConfig, HighwayConfig, HwError, LaneChangeOdds};

    #[test]
    fn default_is_valid() {
        HighwayConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_lanes_rejected() {
        let cfg = HighwayConfig { n_lanes: 0, ..HighwayConfig::default() };
        assert!(matches!(cfg.validate(), Err(HwError::Config(_))));
    }

    #[test]
    fn density_out_of_range_rejected() {
        let cfg = HighwayConfig { lane_density: 1.5, ..HighwayConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(HwError::OutOfUnitRange { name: "lane_density", .. })
        ));
        let cfg = HighwayConfig { lane_density: f64::NAN, ..HighwayConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn too_many_blocked_lanes_rejected() {
        let cfg = HighwayConfig {
            n_lanes:  2,
            closures: Some(ClosureConfig { n_blocked: 3, portion_blocked: 0.2 }),
            ..HighwayConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(HwError::TooManyBlockedLanes { n_blocked: 3, n_lanes: 2 })
        ));
    }

    #[test]
    fn portion_out_of_range_rejected() {
        let cfg = HighwayConfig {
            closures: Some(ClosureConfig { n_blocked: 1, portion_blocked: -0.1 }),
            ..HighwayConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blocked_len_floors() {
        let c = ClosureConfig { n_blocked: 1, portion_blocked: 0.2 };
        assert_eq!(c.blocked_len(100), 20);
        assert_eq!(c.blocked_len(12), 2);
        let full = ClosureConfig { n_blocked: 1, portion_blocked: 1.0 };
        assert_eq!(full.blocked_len(7), 7);
    }

    #[test]
    fn with_slowdown_recouples_odds() {
        let cfg = HighwayConfig::default().with_slowdown(0.2);
        assert_eq!(cfg.slowdown_probability, 0.2);
        assert_eq!(cfg.lane_change_odds, LaneChangeOdds::coupled(0.2));
    }
}

#[cfg(test)]
mod time {
    use crate::{RunConfig, Step};

    #[test]
    fn step_arithmetic() {
        assert_eq!(Step(3).next(), Step(4));
        assert_eq!(Step(3) + 5, Step(8));
        assert_eq!(Step(10).since(Step(4)), 6);
        assert_eq!(Step(2).to_string(), "S2");
    }

    #[test]
    fn snapshot_cadence() {
        let run = RunConfig { total_steps: 10, seed: 1, output_interval_steps: 5 };
        assert!(run.wants_snapshot(Step(0)));
        assert!(!run.wants_snapshot(Step(3)));
        assert!(run.wants_snapshot(Step(5)));
        assert!(!RunConfig::new(10, 1).wants_snapshot(Step(0)));
        assert_eq!(run.end_step(), Step(10));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn derived_seeds_differ() {
        let mut a = SimRng::derive(42, 0);
        let mut b = SimRng::derive(42, 1);
        assert_ne!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn sample_indices_distinct_and_clamped() {
        let mut rng = SimRng::new(1);
        let mut picks = rng.sample_indices(10, 4);
        assert_eq!(picks.len(), 4);
        picks.sort_unstable();
        picks.dedup();
        assert_eq!(picks.len(), 4);
        assert!(picks.iter().all(|&i| i < 10));
        assert_eq!(rng.sample_indices(3, 9).len(), 3);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(3);
        assert!((0..100).all(|_| !rng.gen_bool(0.0)));
        assert!((0..100).all(|_| rng.gen_bool(1.0)));
    }
}
