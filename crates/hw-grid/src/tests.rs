//! Unit tests for hw-grid.

#[cfg(test)]
mod grid {
    use hw_core::{Cell, HwError};

    use crate::Grid;

    #[test]
    fn positions_wrap() {
        let mut g = Grid::new(2, 10);
        g.set_cell(1, 12, Cell::Occupied(3));
        assert_eq!(g.cell_at(1, 2), Cell::Occupied(3));
        assert_eq!(g.cell_at(1, 22), Cell::Occupied(3));
        assert_eq!(g.index(1, 2), 12);
    }

    #[test]
    fn raw_roundtrip_is_lane_major() {
        let raw = [-1, 2, -2, -1, 0, -1];
        let g = Grid::from_raw(2, 3, &raw).unwrap();
        assert_eq!(g.cell_at(0, 1), Cell::Occupied(2));
        assert!(g.is_blocked(0, 2));
        assert_eq!(g.cell_at(1, 1), Cell::Occupied(0));
        assert_eq!(g.to_raw(), raw);
    }

    #[test]
    fn raw_shape_mismatch_rejected() {
        assert!(matches!(
            Grid::from_raw(2, 3, &[-1; 5]),
            Err(HwError::GridShape { expected: 6, got: 5 })
        ));
    }

    #[test]
    fn vehicles_iterates_lane_major() {
        let g = Grid::from_raw(2, 3, &[1, -1, -1, -1, -1, 4]).unwrap();
        let v: Vec<_> = g.vehicles().collect();
        assert_eq!(v, vec![(0, 0, 1), (1, 2, 4)]);
        assert_eq!(g.vehicle_count(), 2);
        assert_eq!(g.lane_vehicle_count(1), 1);
    }

    #[test]
    fn lane_mean_velocity_skips_empty_lanes() {
        let g = Grid::from_raw(2, 4, &[1, 3, -1, -2, -1, -1, -1, -1]).unwrap();
        assert_eq!(g.lane_mean_velocity(0), Some(2.0));
        assert_eq!(g.lane_mean_velocity(1), None);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut g = Grid::new(1, 4);
        let snap = g.snapshot();
        g.set_cell(0, 0, Cell::Occupied(1));
        assert!(snap.cell_at(0, 0).is_empty());
    }

    #[test]
    fn closures_only_keeps_blocked_cells() {
        let g = Grid::from_raw(1, 4, &[2, -2, -1, 0]).unwrap();
        assert_eq!(g.closures_only().to_raw(), vec![-1, -2, -1, -1]);
    }

    #[test]
    fn display_renders_rows() {
        let g = Grid::from_raw(2, 3, &[-1, 2, -2, 5, -1, -1]).unwrap();
        assert_eq!(g.to_string(), ".2#\n5..\n");
    }
}

#[cfg(test)]
mod blockage {
    use hw_core::{ClosureConfig, SimRng};

    use crate::{Blockages, Closure, Grid};

    #[test]
    fn closure_wraps_around_lane_end() {
        let c = Closure { lane: 0, start: 8, len: 4 };
        let covered: Vec<_> = c.positions(10).collect();
        assert_eq!(covered, vec![8, 9, 0, 1]);
        assert!(c.covers(0, 9, 10));
        assert!(c.covers(0, 1, 10));
        assert!(!c.covers(0, 2, 10));
        assert!(!c.covers(1, 9, 10));
    }

    #[test]
    fn random_closes_distinct_lanes() {
        let mut rng = SimRng::new(9);
        let cfg = ClosureConfig { n_blocked: 3, portion_blocked: 0.25 };
        let b = Blockages::random(&cfg, 4, 40, &mut rng);
        assert_eq!(b.closed_lanes().len(), 3);
        assert!(b.closures().iter().all(|c| c.len == 10));

        let mut g = Grid::new(4, 40);
        b.apply(&mut g);
        assert_eq!(g.blocked_count(), 30);
    }

    #[test]
    fn zero_blocked_lanes_is_empty() {
        let mut rng = SimRng::new(1);
        let cfg = ClosureConfig { n_blocked: 0, portion_blocked: 0.5 };
        assert!(Blockages::random(&cfg, 3, 10, &mut rng).is_empty());
    }

    #[test]
    fn from_grid_recovers_runs() {
        let g = Grid::from_raw(2, 6, &[-2, -1, -1, -1, -2, -2, -1, -2, -2, -1, -1, -1]).unwrap();
        let b = Blockages::from_grid(&g);
        assert_eq!(
            b.closures(),
            &[
                Closure { lane: 0, start: 4, len: 3 },
                Closure { lane: 1, start: 1, len: 2 },
            ]
        );
        assert!(b.covers(0, 0, 6));
        assert!(!b.covers(0, 1, 6));
    }

    #[test]
    fn from_grid_fully_closed_lane() {
        let g = Grid::from_raw(1, 3, &[-2, -2, -2]).unwrap();
        assert_eq!(Blockages::from_grid(&g).closures(), &[Closure { lane: 0, start: 0, len: 3 }]);
    }
}

#[cfg(test)]
mod gap {
    use hw_core::Cell;

    use crate::{GapAnalyzer, Grid, Obstacle, ObstacleKind, safe_velocity_from};

    fn lane(raw: &[i32]) -> Grid {
        Grid::from_raw(1, raw.len(), raw).unwrap()
    }

    #[test]
    fn rule_branches() {
        // obstacle within reach: d - 1
        assert_eq!(safe_velocity_from(3, 2, 5), 1);
        assert_eq!(safe_velocity_from(3, 4, 5), 3);
        // free acceleration
        assert_eq!(safe_velocity_from(2, 10, 5), 3);
        // at the limit
        assert_eq!(safe_velocity_from(5, 10, 5), 5);
        assert_eq!(safe_velocity_from(0, 1, 5), 0);
    }

    #[test]
    fn rule_stays_in_bounds() {
        for max in 0..6 {
            for v in 0..=max {
                for d in 1..15usize {
                    let s = safe_velocity_from(v, d, max);
                    assert!(s <= max, "v={v} d={d} max={max} → {s}");
                    assert!((s as usize) < d, "v={v} d={d} max={max} → {s}");
                }
            }
        }
    }

    #[test]
    fn forward_gap_to_vehicle() {
        let g = lane(&[3, -1, 0, -1, -1, -1, -1, -1, -1, -1]);
        let gap = GapAnalyzer::new(&g, 5);
        assert_eq!(gap.forward_gap(0, 0), 2);
        assert_eq!(gap.safe_velocity(0, 0), Some(1));
        // wraps around to the first vehicle
        assert_eq!(gap.forward_gap(0, 2), 8);
    }

    #[test]
    fn lone_vehicle_sees_itself() {
        let g = lane(&[2, -1, -1, -1, -1, -1, -1, -1, -1, -1]);
        let gap = GapAnalyzer::new(&g, 5);
        assert_eq!(
            gap.forward_obstacle(0, 0),
            Obstacle { distance: 10, kind: ObstacleKind::Itself }
        );
        assert_eq!(gap.safe_velocity(0, 0), Some(3));
    }

    #[test]
    fn closure_is_an_obstacle() {
        let g = lane(&[-1, -1, -1, 3, -1, -2, -2, -1]);
        let gap = GapAnalyzer::new(&g, 5);
        let ahead = gap.forward_obstacle(0, 3);
        assert!(ahead.is_closure());
        assert_eq!(ahead.distance, 2);
        assert_eq!(gap.safe_velocity(0, 3), Some(1));
    }

    #[test]
    fn safe_velocity_none_off_vehicle() {
        let g = lane(&[-1, -2, 1]);
        let gap = GapAnalyzer::new(&g, 5);
        assert_eq!(gap.safe_velocity(0, 0), None);
        assert_eq!(gap.safe_velocity(0, 1), None);
    }

    #[test]
    fn backward_obstacle_wraps() {
        let g = lane(&[-1, -1, -1, -1, 2, -1]);
        let gap = GapAnalyzer::new(&g, 5);
        let behind = gap.backward_obstacle(0, 1);
        assert_eq!(behind, Obstacle { distance: 3, kind: ObstacleKind::Vehicle(2) });
    }

    #[test]
    fn hypothetical_occupant_in_empty_lane() {
        let g = Grid::new(1, 10);
        let gap = GapAnalyzer::new(&g, 5);
        assert_eq!(gap.forward_gap(0, 4), 10);
        assert_eq!(gap.safe_velocity_as(5, 0, 4), 5);
    }

    #[test]
    fn follower_collision_check() {
        // follower at 0 with v=2 heading into a free lane: next velocity 3.
        let mut g = Grid::new(1, 12);
        g.set_cell(0, 0, Cell::Occupied(2));
        let gap = GapAnalyzer::new(&g, 5);
        assert!(gap.would_collide(0, 0, 3));
        assert!(!gap.would_collide(0, 0, 4));
        assert!(gap.endangers_follower(0, 2));
        assert!(!gap.endangers_follower(0, 5));
    }

    #[test]
    fn closure_behind_never_endangers() {
        let g = lane(&[-2, -1, -1, -1]);
        let gap = GapAnalyzer::new(&g, 5);
        assert!(!gap.endangers_follower(0, 1));
        assert!(!gap.would_collide(0, 0, 1));
    }
}

#[cfg(test)]
mod builder {
    use hw_core::{ClosureConfig, SimRng};

    use crate::{Blockages, GridBuilder};

    #[test]
    fn populate_respects_closures() {
        let mut rng = SimRng::new(5);
        let cfg = ClosureConfig { n_blocked: 2, portion_blocked: 0.5 };
        let blockages = Blockages::random(&cfg, 2, 20, &mut rng);
        let grid = GridBuilder::new(2, 20)
            .blockages(&blockages)
            .populate(1.0, 5, &mut rng)
            .build();
        assert_eq!(grid.blocked_count(), 20);
        assert_eq!(grid.vehicle_count(), 20);
        for (lane, pos, v) in grid.vehicles() {
            assert!(!blockages.covers(lane, pos, 20));
            assert!(v <= 5);
        }
    }

    #[test]
    fn density_is_fraction_of_open_cells() {
        let mut rng = SimRng::new(11);
        let grid = GridBuilder::new(3, 100).populate(0.25, 5, &mut rng).build();
        for lane in 0..3 {
            assert_eq!(grid.lane_vehicle_count(lane), 25);
        }
    }

    #[test]
    fn tiny_density_seeds_one_vehicle() {
        let mut rng = SimRng::new(2);
        let grid = GridBuilder::new(2, 10).populate(0.01, 5, &mut rng).build();
        assert_eq!(grid.lane_vehicle_count(0), 1);
        assert_eq!(grid.lane_vehicle_count(1), 1);
    }

    #[test]
    fn zero_density_is_empty() {
        let mut rng = SimRng::new(2);
        let grid = GridBuilder::new(2, 10).populate(0.0, 5, &mut rng).build();
        assert_eq!(grid.vehicle_count(), 0);
    }

    #[test]
    fn same_seed_same_grid() {
        let build = |seed| {
            let mut rng = SimRng::new(seed);
            GridBuilder::new(2, 50).populate(0.4, 5, &mut rng).build()
        };
        assert_eq!(build(77), build(77));
    }
}
