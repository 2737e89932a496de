use broadside::{Board, BoardError, Cell, Coordinate, ShotOutcome, BOARD_SIZE, FLEET};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.place_randomly(&mut rng).unwrap();
    let shots = rng.random_range(0..BOARD_SIZE);
    for _ in 0..shots {
        let x = rng.random_range(0..BOARD_SIZE);
        let y = rng.random_range(0..BOARD_SIZE);
        let _ = board.apply_shot(Coordinate::new(x, y));
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_is_straight_and_disjoint(seed in any::<u64>()) {
        let mut board = Board::new();
        board.place_randomly(&mut SmallRng::seed_from_u64(seed)).unwrap();

        let mut covered = Vec::new();
        for code in FLEET {
            let placement = board.placement(code).unwrap();
            let cells: Vec<Coordinate> = placement.cells().collect();
            prop_assert_eq!(cells.len(), code.length());
            let dir = placement.orientation.forward();
            for (i, cell) in cells.iter().enumerate() {
                prop_assert_eq!(placement.origin.offset(dir, i), Some(*cell));
                prop_assert_eq!(board.cell(*cell), Some(Cell::Ship(code)));
            }
            covered.extend(cells);
        }
        let total = covered.len();
        covered.sort();
        covered.dedup();
        prop_assert_eq!(covered.len(), total);
    }

    #[test]
    fn shot_is_idempotent_safe(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let mut board = random_board(seed);
        let coord = Coordinate::new(x, y);
        let before = board.clone();
        let first = board.apply_shot(coord);
        if before.is_shot(coord) {
            prop_assert_eq!(first, Err(BoardError::AlreadyShot(coord)));
            prop_assert_eq!(&board, &before);
        } else {
            prop_assert!(first.is_ok());
            prop_assert_ne!(&board, &before);
        }
        let after = board.clone();
        prop_assert_eq!(board.apply_shot(coord), Err(BoardError::AlreadyShot(coord)));
        prop_assert_eq!(&board, &after);
    }

    #[test]
    fn health_drops_by_one_and_sinks_once(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.place_randomly(&mut rng).unwrap();
        let mut order: Vec<Coordinate> = Coordinate::all().collect();
        order.shuffle(&mut rng);

        let mut sunk = Vec::new();
        for coord in order {
            let target = match board.cell(coord) {
                Some(Cell::Ship(code)) => Some(code),
                _ => None,
            };
            let health_before = target.map(|code| board.ship(code).unwrap().health());
            let outcome = board.apply_shot(coord).unwrap();
            match (target, outcome) {
                (None, ShotOutcome::Miss) => {}
                (Some(code), ShotOutcome::Hit(hit)) => {
                    prop_assert_eq!(code, hit);
                    prop_assert_eq!(board.ship(code).unwrap().health() + 1, health_before.unwrap());
                }
                (Some(code), ShotOutcome::Sunk(hit)) => {
                    prop_assert_eq!(code, hit);
                    prop_assert_eq!(health_before, Some(1));
                    prop_assert_eq!(board.ship(code).unwrap().health(), 0);
                    sunk.push(code);
                }
                (target, outcome) => prop_assert!(false, "{:?} resolved as {:?}", target, outcome),
            }
        }
        sunk.sort_by_key(|code| code.index());
        prop_assert_eq!(sunk, FLEET.to_vec());
        prop_assert!(board.all_sunk());
    }
}
