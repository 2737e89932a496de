use core::fmt;

use log::{info, warn};
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::{
    ai::ProbabilityBoard,
    board::Board,
    common::{BoardError, Coordinate, ShotOutcome},
    config::MAX_SELECTION_ATTEMPTS,
    player::{Player, Strategy},
};

/// One of the two fleets in a game. Player 1 always fires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Side),
    /// Both fleets went down in the same round.
    Draw,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(Side),
    #[error("{0} is not computer controlled")]
    NoComputerOpponent(Side),
    #[error("{0} has not placed a complete fleet")]
    IncompleteFleet(Side),
    #[error("{0} could not find a target")]
    TargetingExhausted(Side),
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Turn orchestrator core: both boards, whose turn it is, and the computer
/// players seated at either side. `boards[i]` holds side `i`'s own fleet.
pub struct GameEngine {
    boards: [Board; 2],
    cpus: [Option<Box<dyn Player>>; 2],
    rng: SmallRng,
    turn: Side,
    round: usize,
    shots: [usize; 2],
    last_shot: [Option<(Coordinate, ShotOutcome)>; 2],
    status: GameStatus,
}

impl GameEngine {
    /// Seat two fleets. A side with `Some` player is driven by
    /// [`cpu_shoot`](Self::cpu_shoot), a side with `None` by
    /// [`shoot`](Self::shoot).
    pub fn new(
        boards: [Board; 2],
        cpus: [Option<Box<dyn Player>>; 2],
        rng: SmallRng,
    ) -> Result<Self, GameError> {
        for side in Side::BOTH {
            if !boards[side.index()].is_fleet_complete() {
                return Err(GameError::IncompleteFleet(side));
            }
        }
        Ok(Self {
            boards,
            cpus,
            rng,
            turn: Side::One,
            round: 1,
            shots: [0; 2],
            last_shot: [None; 2],
            status: GameStatus::InProgress,
        })
    }

    /// Human (side one) against a computer opponent. The computer places its
    /// own fleet unless `cpu_board` is given.
    pub fn against_computer(
        human: Board,
        cpu_board: Option<Board>,
        strategy: Strategy,
        mut rng: SmallRng,
    ) -> Result<Self, GameError> {
        let mut cpu = strategy.into_player();
        let cpu_board = match cpu_board {
            Some(board) => board,
            None => {
                let mut board = Board::new();
                cpu.place_ships(&mut rng, &mut board)?;
                board
            }
        };
        Self::new([human, cpu_board], [None, Some(cpu)], rng)
    }

    /// Two humans sharing the terminal.
    pub fn two_player(first: Board, second: Board, rng: SmallRng) -> Result<Self, GameError> {
        Self::new([first, second], [None, None], rng)
    }

    /// Two computer players, each placing its own fleet.
    pub fn computer_vs_computer(
        strategies: [Strategy; 2],
        mut rng: SmallRng,
    ) -> Result<Self, GameError> {
        let mut boards = [Board::new(), Board::new()];
        let mut cpus = strategies.map(Strategy::into_player);
        for (board, cpu) in boards.iter_mut().zip(cpus.iter_mut()) {
            cpu.place_ships(&mut rng, board)?;
        }
        Self::new(boards, cpus.map(Some), rng)
    }

    /// The fleet belonging to `side`.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// Side whose shot is next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_finished(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Returns `true` if `side` is played by the computer.
    pub fn is_computer(&self, side: Side) -> bool {
        self.cpus[side.index()].is_some()
    }

    /// Shots fired by `side` so far.
    pub fn shots(&self, side: Side) -> usize {
        self.shots[side.index()]
    }

    /// The last shot fired by `side` and its outcome.
    pub fn last_shot(&self, side: Side) -> Option<(Coordinate, ShotOutcome)> {
        self.last_shot[side.index()]
    }

    /// Probability board behind the last shot of the computer at `side`, if
    /// that shot was a cold one.
    pub fn probability(&self, side: Side) -> Option<&ProbabilityBoard> {
        self.cpus[side.index()]
            .as_ref()
            .and_then(|cpu| cpu.probability())
    }

    /// Fire a human shot at `coord` for the side whose turn it is.
    /// A repeated shot is returned as [`BoardError::AlreadyShot`] and does not
    /// consume the turn.
    pub fn shoot(&mut self, coord: Coordinate) -> Result<ShotOutcome, GameError> {
        if self.is_game_finished() {
            return Err(GameError::GameOver);
        }
        let side = self.turn;
        if self.is_computer(side) {
            return Err(GameError::NotYourTurn(side));
        }
        let outcome = self.boards[side.other().index()].apply_shot(coord)?;
        self.finish_turn(side, coord, outcome);
        Ok(outcome)
    }

    /// Let the computer whose turn it is pick a target and fire.
    pub fn cpu_shoot(&mut self) -> Result<(Coordinate, ShotOutcome), GameError> {
        if self.is_game_finished() {
            return Err(GameError::GameOver);
        }
        let side = self.turn;
        let target = &mut self.boards[side.other().index()];
        let Some(cpu) = self.cpus[side.index()].as_mut() else {
            return Err(GameError::NoComputerOpponent(side));
        };

        for _ in 0..MAX_SELECTION_ATTEMPTS {
            let coord = cpu.select_target(&mut self.rng, &target.target_view());
            match target.apply_shot(coord) {
                Ok(outcome) => {
                    cpu.handle_shot_result(&target.target_view(), coord, outcome);
                    self.finish_turn(side, coord, outcome);
                    return Ok((coord, outcome));
                }
                Err(BoardError::AlreadyShot(_)) => {
                    warn!("{} ({}) picked {} twice, retrying", side, cpu.name(), coord);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(GameError::TargetingExhausted(side))
    }

    fn finish_turn(&mut self, side: Side, coord: Coordinate, outcome: ShotOutcome) {
        self.shots[side.index()] += 1;
        self.last_shot[side.index()] = Some((coord, outcome));
        self.turn = side.other();
        if self.turn == Side::One {
            self.end_round();
        }
    }

    /// Fleets are compared only once both sides have fired.
    fn end_round(&mut self) {
        let one_down = self.boards[Side::One.index()].all_sunk();
        let two_down = self.boards[Side::Two.index()].all_sunk();
        self.status = match (one_down, two_down) {
            (true, true) => GameStatus::Draw,
            (false, true) => GameStatus::Won(Side::One),
            (true, false) => GameStatus::Won(Side::Two),
            (false, false) => {
                self.round += 1;
                return;
            }
        };
        info!("game over after {} rounds: {:?}", self.round, self.status);
    }
}
