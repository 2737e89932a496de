use std::collections::HashSet;

use broadside::{
    can_ship_exist, Board, Coordinate, Direction, HuntMode, Orientation, ShipCode, ShotOutcome,
    TargetingEngine,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

fn c(x: usize, y: usize) -> Coordinate {
    Coordinate::new(x, y)
}

fn board_with(ships: &[(ShipCode, Coordinate, Orientation)]) -> Board {
    let mut board = Board::new();
    for &(code, origin, orientation) in ships {
        board.place(code, origin, orientation).unwrap();
    }
    board
}

/// Fire at `coord` outside the engine's own selection and report it.
fn force_shot(engine: &mut TargetingEngine, board: &mut Board, coord: Coordinate) -> ShotOutcome {
    let outcome = board.apply_shot(coord).unwrap();
    engine.record_result(&board.target_view(), coord, outcome);
    outcome
}

/// Let the engine choose, fire and learn from one shot.
fn engine_shot(engine: &mut TargetingEngine, board: &mut Board) -> (Coordinate, ShotOutcome) {
    let coord = engine.next_target(&board.target_view());
    assert!(!board.is_shot(coord), "engine fired twice at {}", coord);
    let outcome = board.apply_shot(coord).unwrap();
    engine.record_result(&board.target_view(), coord, outcome);
    (coord, outcome)
}

#[test]
fn test_first_hit_fans_out_to_fitting_neighbors() {
    let mut board = board_with(&[(ShipCode::Carrier, c(0, 0), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    assert!(engine.is_idle());

    let outcome = force_shot(&mut engine, &mut board, c(0, 0));
    assert_eq!(outcome, ShotOutcome::Hit(ShipCode::Carrier));

    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Seeking);
    assert_eq!(hunt.hits(), &[c(0, 0)]);
    let queued: HashSet<Coordinate> = hunt.pending().copied().collect();
    assert_eq!(queued, HashSet::from([c(1, 0), c(0, 1)]));
}

#[test]
fn test_fan_out_skips_axes_the_ship_cannot_fill() {
    let mut board = board_with(&[(ShipCode::Carrier, c(0, 0), Orientation::Vertical)]);
    let mut engine = TargetingEngine::new();
    assert_eq!(force_shot(&mut engine, &mut board, c(3, 0)), ShotOutcome::Miss);
    assert!(engine.is_idle());

    force_shot(&mut engine, &mut board, c(0, 0));
    // only (1, 0) and (2, 0) are open to the right, too short for a carrier
    let queued: Vec<Coordinate> = engine
        .hunt(ShipCode::Carrier)
        .unwrap()
        .pending()
        .copied()
        .collect();
    assert_eq!(queued, vec![c(0, 1)]);
    assert!(can_ship_exist(&board.target_view(), 2, c(0, 0), Direction::Right));
}

#[test]
fn test_extends_along_confirmed_axis_until_sunk() {
    let mut board = board_with(&[(ShipCode::Carrier, c(0, 0), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(0, 0));

    let mut fired = Vec::new();
    let mut last = ShotOutcome::Miss;
    while !matches!(last, ShotOutcome::Sunk(_)) {
        let (coord, outcome) = engine_shot(&mut engine, &mut board);
        fired.push(coord);
        last = outcome;
        assert!(fired.len() <= 6, "took too long: {:?}", fired);
    }
    // equal scores keep Up, Down, Left, Right order so down comes first
    assert_eq!(fired, vec![c(0, 1), c(1, 0), c(2, 0), c(3, 0), c(4, 0)]);
    assert_eq!(last, ShotOutcome::Sunk(ShipCode::Carrier));
    assert!(engine.is_idle());
}

#[test]
fn test_miss_while_extending_backtracks_past_first_hit() {
    let mut board = board_with(&[(ShipCode::Carrier, c(3, 5), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(5, 5));

    let queued: Vec<Coordinate> = engine
        .hunt(ShipCode::Carrier)
        .unwrap()
        .pending()
        .copied()
        .collect();
    // best scores first, ties in Up, Down, Left, Right order
    assert_eq!(queued, vec![c(5, 4), c(4, 5), c(5, 6), c(6, 5)]);

    assert_eq!(engine_shot(&mut engine, &mut board), (c(5, 4), ShotOutcome::Miss));
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(4, 5), ShotOutcome::Hit(ShipCode::Carrier))
    );
    assert_eq!(
        engine.hunt(ShipCode::Carrier).unwrap().mode(),
        HuntMode::Extending {
            heading: Direction::Left
        }
    );
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(3, 5), ShotOutcome::Hit(ShipCode::Carrier))
    );
    assert_eq!(engine_shot(&mut engine, &mut board), (c(2, 5), ShotOutcome::Miss));

    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Backtracking);
    // one cell per point of health left, walking right from the first hit
    let queued: Vec<Coordinate> = hunt.pending().copied().collect();
    assert_eq!(queued, vec![c(6, 5), c(7, 5)]);

    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(6, 5), ShotOutcome::Hit(ShipCode::Carrier))
    );
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(7, 5), ShotOutcome::Sunk(ShipCode::Carrier))
    );
    assert!(engine.is_idle());
}

#[test]
fn test_edge_turns_extension_around() {
    // carrier against the right edge, discovered second from the edge
    let mut board = board_with(&[(ShipCode::Carrier, c(5, 2), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(8, 2));
    force_shot(&mut engine, &mut board, c(9, 2));

    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Backtracking);
    let queued: Vec<Coordinate> = hunt.pending().copied().collect();
    assert_eq!(queued, vec![c(7, 2), c(6, 2), c(5, 2)]);

    for _ in 0..3 {
        engine_shot(&mut engine, &mut board);
    }
    assert!(board.ship(ShipCode::Carrier).unwrap().is_sunk());
    assert!(engine.is_idle());
}

#[test]
fn test_queued_cell_shot_elsewhere_is_skipped() {
    let mut board = board_with(&[(ShipCode::Carrier, c(0, 0), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(0, 0));
    board.apply_shot(c(0, 1)).unwrap();

    assert_eq!(engine.next_target(&board.target_view()), c(1, 0));
}

#[test]
fn test_hunts_are_served_in_discovery_order() {
    let mut board = board_with(&[
        (ShipCode::PatrolBoat, c(0, 0), Orientation::Horizontal),
        (ShipCode::Destroyer, c(0, 1), Orientation::Horizontal),
    ]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(0, 0));
    force_shot(&mut engine, &mut board, c(0, 1));
    let order: Vec<ShipCode> = engine.hunts().iter().map(|h| h.code()).collect();
    assert_eq!(order, vec![ShipCode::PatrolBoat, ShipCode::Destroyer]);

    // (0, 1) is already shot, so the patrol boat falls next
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(1, 0), ShotOutcome::Sunk(ShipCode::PatrolBoat))
    );
    assert!(engine.hunt(ShipCode::PatrolBoat).is_none());
    assert!(engine.hunt(ShipCode::Destroyer).is_some());

    for _ in 0..10 {
        if board.ship(ShipCode::Destroyer).unwrap().is_sunk() {
            break;
        }
        engine_shot(&mut engine, &mut board);
    }
    assert!(board.all_sunk());
    assert!(engine.is_idle());
}

#[test]
fn test_cold_shot_keeps_probability_board() {
    let board = board_with(&[(ShipCode::PatrolBoat, c(8, 9), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    assert!(engine.last_probability().is_none());
    let shot = engine.next_target(&board.target_view());
    assert_eq!(shot, c(2, 1));
    let matrix = engine.last_probability().unwrap();
    assert_eq!(matrix[1][2], 4);
}

#[test]
fn test_queued_shot_drops_stale_probability_board() {
    let mut board = board_with(&[(ShipCode::Carrier, c(0, 0), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    engine.next_target(&board.target_view());
    assert!(engine.last_probability().is_some());

    force_shot(&mut engine, &mut board, c(0, 0));
    let next = engine.next_target(&board.target_view());
    assert!(next == c(1, 0) || next == c(0, 1));
    assert!(engine.last_probability().is_none());
}

#[test]
fn test_extension_into_other_ship_backtracks_after_it_sinks() {
    // patrol boat sits right past the carrier's left end
    let mut board = board_with(&[
        (ShipCode::Carrier, c(3, 5), Orientation::Horizontal),
        (ShipCode::PatrolBoat, c(1, 5), Orientation::Horizontal),
    ]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(5, 5));
    force_shot(&mut engine, &mut board, c(4, 5));
    force_shot(&mut engine, &mut board, c(3, 5));

    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(2, 5), ShotOutcome::Hit(ShipCode::PatrolBoat))
    );
    let order: Vec<ShipCode> = engine.hunts().iter().map(|h| h.code()).collect();
    assert_eq!(order, vec![ShipCode::Carrier, ShipCode::PatrolBoat]);

    for _ in 0..4 {
        if board.ship(ShipCode::PatrolBoat).unwrap().is_sunk() {
            break;
        }
        let (coord, _) = engine_shot(&mut engine, &mut board);
        assert!(coord.x <= 2, "left the patrol boat hunt for {}", coord);
    }
    assert!(board.ship(ShipCode::PatrolBoat).unwrap().is_sunk());
    assert!(engine.hunt(ShipCode::PatrolBoat).is_none());

    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.pending().count(), 0);
    assert_eq!(
        hunt.mode(),
        HuntMode::Extending {
            heading: Direction::Left
        }
    );

    // the empty queue is rebuilt from the first hit, heading the other way
    assert_eq!(engine.next_target(&board.target_view()), c(6, 5));
    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Backtracking);
    assert_eq!(hunt.pending().copied().collect::<Vec<_>>(), vec![c(7, 5)]);

    let outcome = board.apply_shot(c(6, 5)).unwrap();
    engine.record_result(&board.target_view(), c(6, 5), outcome);
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(7, 5), ShotOutcome::Sunk(ShipCode::Carrier))
    );
    assert!(engine.is_idle());
}

#[test]
fn test_split_hits_fall_back_to_sweeping() {
    let mut board = board_with(&[(ShipCode::Carrier, c(2, 5), Orientation::Horizontal)]);
    let mut engine = TargetingEngine::new();
    force_shot(&mut engine, &mut board, c(4, 5));
    // a second hit with a gap at (5, 5)
    force_shot(&mut engine, &mut board, c(6, 5));

    assert_eq!(engine_shot(&mut engine, &mut board), (c(7, 5), ShotOutcome::Miss));
    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Backtracking);
    assert_eq!(
        hunt.pending().copied().collect::<Vec<_>>(),
        vec![c(3, 5), c(2, 5), c(1, 5)]
    );

    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(3, 5), ShotOutcome::Hit(ShipCode::Carrier))
    );
    assert_eq!(
        engine_shot(&mut engine, &mut board),
        (c(2, 5), ShotOutcome::Hit(ShipCode::Carrier))
    );
    assert_eq!(engine_shot(&mut engine, &mut board), (c(1, 5), ShotOutcome::Miss));
    assert_eq!(engine.hunt(ShipCode::Carrier).unwrap().pending().count(), 0);

    let next = engine.next_target(&board.target_view());
    let hunt = engine.hunt(ShipCode::Carrier).unwrap();
    assert_eq!(hunt.mode(), HuntMode::Sweeping);
    let mut swept: Vec<Coordinate> = hunt.pending().copied().collect();
    swept.push(next);
    assert!(swept.contains(&c(5, 5)));
    for cell in swept {
        assert!(!board.is_shot(cell), "{} already shot", cell);
        assert!(
            hunt.hits().iter().any(|hit| hit.neighbors().any(|(_, n)| n == cell)),
            "{} is not next to a hit",
            cell
        );
    }

    let outcome = board.apply_shot(next).unwrap();
    engine.record_result(&board.target_view(), next, outcome);
    for _ in 0..12 {
        if board.ship(ShipCode::Carrier).unwrap().is_sunk() {
            break;
        }
        engine_shot(&mut engine, &mut board);
    }
    assert!(board.ship(ShipCode::Carrier).unwrap().is_sunk());
    assert!(engine.is_idle());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn engine_sinks_fleet_without_repeats(seed in any::<u64>()) {
        let mut board = Board::new();
        board.place_randomly(&mut SmallRng::seed_from_u64(seed)).unwrap();
        let mut engine = TargetingEngine::new();

        let mut shots = 0;
        while !board.all_sunk() {
            let coord = engine.next_target(&board.target_view());
            prop_assert!(coord.in_bounds());
            prop_assert!(!board.is_shot(coord), "repeat at {} after {} shots", coord, shots);
            let outcome = board.apply_shot(coord).unwrap();
            engine.record_result(&board.target_view(), coord, outcome);
            shots += 1;
            prop_assert!(shots <= 100);
        }
        prop_assert!(engine.is_idle());
    }
}
