use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::player::Strategy;
use crate::ship::ShipCode;

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;
/// Number of cells on a board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
pub const NUM_SHIPS: usize = 5;
/// The fleet each side places, largest first.
pub const FLEET: [ShipCode; NUM_SHIPS] = ShipCode::ALL;

/// Total number of ship segments in the fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells();

const fn fleet_cells() -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < NUM_SHIPS {
        total += FLEET[i].length();
        i += 1;
    }
    total
}

/// Token used for an empty cell in board files and on rendered boards.
pub const EMPTY_MARKER: char = '-';

/// Upper bound on how many candidates the CPU may discard in one turn.
pub const MAX_SELECTION_ATTEMPTS: usize = BOARD_CELLS;

/// Random placement gives up on a ship after this many overlapping picks.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Settings for an interactive session. Anything left unset is asked for
/// at the prompt.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// 1 plays against the computer, 2 is hot-seat.
    pub players: Option<u8>,
    /// Board files for player 1 and player 2 (or the computer).
    pub layouts: [Option<PathBuf>; 2],
    pub strategy: Strategy,
    /// Fixed seed for reproducible placement and play.
    pub seed: Option<u64>,
    /// Print the computer's probability board after each of its shots.
    pub show_probability: bool,
}

impl GameConfig {
    /// Random number generator for one game, seeded from `seed` when set.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}
