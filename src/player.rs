use clap::ValueEnum;
use rand::rngs::SmallRng;

use crate::{
    ai::ProbabilityBoard,
    board::{Board, TargetView},
    common::{BoardError, Coordinate, ShotOutcome},
    player_ai::{AiPlayer, RandomPlayer},
};

/// Interface implemented by computer opponents.
///
/// A Player is responsible for:
/// - Placing its ships on its own board
/// - Selecting the next cell to fire at on the opponent board
/// - Learning from the outcome of each shot
pub trait Player {
    /// Short label used in logs and the simulation summary.
    fn name(&self) -> &'static str;

    /// Place all ships onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        board.place_randomly(rng)
    }

    /// Choose the next target given what is known of the opponent board.
    fn select_target(&mut self, rng: &mut SmallRng, view: &TargetView<'_>) -> Coordinate;

    /// Inform the player of the result of its last shot. `view` already
    /// includes that shot.
    fn handle_shot_result(
        &mut self,
        _view: &TargetView<'_>,
        _coord: Coordinate,
        _outcome: ShotOutcome,
    ) {
    }

    /// Probability board behind the last shot when it was a cold shot.
    fn probability(&self) -> Option<&ProbabilityBoard> {
        None
    }
}

/// Which computer opponent to play against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Hunt/sink targeting backed by the probability heuristic.
    #[default]
    Targeting,
    /// Fires at random unshot cells.
    Random,
}

impl Strategy {
    pub fn into_player(self) -> Box<dyn Player> {
        match self {
            Strategy::Targeting => Box::new(AiPlayer::new()),
            Strategy::Random => Box::new(RandomPlayer::new()),
        }
    }
}
