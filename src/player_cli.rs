//! Interactive terminal game: prompts, input validation and the turn loop.
//!
//! The session is generic over its input and output so a whole game can be
//! driven from a script.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use log::info;
use thiserror::Error;

use crate::{
    board::Board,
    common::{BoardError, Coordinate},
    config::{GameConfig, BOARD_SIZE},
    game::{GameEngine, GameError, GameStatus, Side},
    layout::{load_layout, BoardFileError},
    ui,
};

/// Invalid input at a prompt. Reported to the user, who is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("No option entered.")]
    Empty,
    #[error("Invalid co-ordinate length.")]
    BadLength,
    #[error("The x-coordinate is out of range. Enter between A and J.")]
    ColumnOutOfRange,
    #[error("The y-coordinate must be in numbers.")]
    RowNotNumeric,
    #[error("The y-coordinate is out of range. Enter between 1 and 10.")]
    RowOutOfRange,
    #[error("{0} has already been shot, pick another co-ordinate.")]
    RepeatedShot(Coordinate),
    #[error("Invalid option, {0}.")]
    InvalidChoice(&'static str),
}

/// Parse a coordinate such as `A1` or `j10` (column letter, then row).
pub fn parse_coord(input: &str) -> Result<Coordinate, InputError> {
    let input = input.trim();
    let mut chars = input.chars();
    let Some(col) = chars.next() else {
        return Err(InputError::Empty);
    };
    let row = chars.as_str();
    if !(1..=2).contains(&row.chars().count()) {
        return Err(InputError::BadLength);
    }

    let col = col.to_ascii_uppercase();
    if !('A'..='J').contains(&col) {
        return Err(InputError::ColumnOutOfRange);
    }
    if !row.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::RowNotNumeric);
    }
    let row: usize = row.parse().map_err(|_| InputError::RowNotNumeric)?;
    if !(1..=BOARD_SIZE).contains(&row) {
        return Err(InputError::RowOutOfRange);
    }
    Ok(Coordinate::new((col as u8 - b'A') as usize, row - 1))
}

/// Parse a single-letter `Y`/`N` answer.
pub fn parse_yes_no(input: &str) -> Result<bool, InputError> {
    match single_char(input)? {
        'Y' | 'y' => Ok(true),
        'N' | 'n' => Ok(false),
        _ => Err(InputError::InvalidChoice("enter Y or N")),
    }
}

/// Parse the number of human players.
pub fn parse_player_count(input: &str) -> Result<u8, InputError> {
    match single_char(input)? {
        '1' => Ok(1),
        '2' => Ok(2),
        '0' => Err(InputError::InvalidChoice("you can't have no players")),
        c if c.is_ascii_digit() => Err(InputError::InvalidChoice("it must be either 1 or 2")),
        _ => Err(InputError::InvalidChoice("only digits are allowed")),
    }
}

fn single_char(input: &str) -> Result<char, InputError> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(InputError::Empty),
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(InputError::InvalidChoice("input is too long")),
    }
}

/// Input ended while a prompt was waiting for an answer.
#[derive(Debug, Error)]
#[error("input closed")]
struct InputClosed;

/// An interactive session: set up a game, play it, offer another.
pub struct CliSession<R, W> {
    input: R,
    output: W,
    config: GameConfig,
}

impl<R: BufRead, W: Write> CliSession<R, W> {
    pub fn new(input: R, output: W, config: GameConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Run games until the player declines another one or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        match self.run_games() {
            Err(err) if err.is::<InputClosed>() => {
                writeln!(self.output)?;
                writeln!(self.output, "Terminating game...")?;
                Ok(())
            }
            other => other,
        }
    }

    fn run_games(&mut self) -> anyhow::Result<()> {
        // Board files named on the command line are loaded once; a bad one
        // ends the session.
        let mut preset: [Option<Board>; 2] = [None, None];
        for side in Side::BOTH {
            if let Some(path) = &self.config.layouts[side.index()] {
                let board = load_layout(path)
                    .with_context(|| format!("loading the board for {}", side))?;
                preset[side.index()] = Some(board);
            }
        }

        loop {
            writeln!(self.output, "-----------------------Battleship---------------------")?;
            match self.setup(&preset) {
                Ok(engine) => self.play(engine)?,
                Err(err) => match err.downcast::<BoardFileError>() {
                    Ok(file_err) => {
                        writeln!(self.output, "Error: {}", file_err)?;
                        writeln!(self.output, "Restarting game...")?;
                        continue;
                    }
                    Err(other) => return Err(other),
                },
            }

            let again = self.ask("Do you want to play again (Y/N)? ", parse_yes_no)?;
            if !again {
                writeln!(self.output, "Terminating game...")?;
                return Ok(());
            }
        }
    }

    fn setup(&mut self, preset: &[Option<Board>; 2]) -> anyhow::Result<GameEngine> {
        let players = match self.config.players {
            Some(n) => n,
            None => self.ask("Enter the number of players (1 or 2): ", parse_player_count)?,
        };
        let mut rng = self.config.rng();

        let mut boards: [Option<Board>; 2] = preset.clone();
        for side in Side::BOTH.into_iter().take(players as usize) {
            if boards[side.index()].is_some() {
                continue;
            }
            let prompt = format!("Load pre-positioned ships for {} (Y/N)? ", side);
            let board = if self.ask(&prompt, parse_yes_no)? {
                let path = self.read_line(&format!("Enter the path to {}'s board file: ", side))?;
                load_layout(PathBuf::from(path.trim()))?
            } else {
                let mut board = Board::new();
                board.place_randomly(&mut rng)?;
                board
            };
            boards[side.index()] = Some(board);
        }

        let [first, second] = boards;
        let first = first.ok_or(GameError::IncompleteFleet(Side::One))?;
        let engine = if players == 1 {
            GameEngine::against_computer(first, second, self.config.strategy, rng)?
        } else {
            let second = second.ok_or(GameError::IncompleteFleet(Side::Two))?;
            GameEngine::two_player(first, second, rng)?
        };
        info!("new game with {} player(s)", players);
        Ok(engine)
    }

    fn play(&mut self, mut engine: GameEngine) -> anyhow::Result<()> {
        let solo = engine.is_computer(Side::Two);
        while !engine.is_game_finished() {
            let side = engine.turn();
            if engine.is_computer(side) {
                writeln!(self.output)?;
                writeln!(self.output, "----------------------CPU's Turn----------------------")?;
                let (coord, outcome) = engine.cpu_shoot()?;
                writeln!(self.output, "The CPU fires at {}. {}", coord, outcome)?;
                writeln!(self.output, "{}", ui::sunk_summary(engine.board(side.other())))?;
                if self.config.show_probability {
                    if let Some(matrix) = engine.probability(side) {
                        write!(self.output, "{}", ui::render_probability_board(matrix))?;
                    }
                }
                continue;
            }

            writeln!(self.output)?;
            if solo {
                writeln!(self.output, "-----------------------Your Turn----------------------")?;
            } else {
                writeln!(
                    self.output,
                    "------------------------P{} Turn-----------------------",
                    side.index() + 1
                )?;
            }
            write!(self.output, "{}", ui::render_player_view(&engine, side))?;

            loop {
                let coord = self.ask("Enter the co-ordinates (e.g. A1): ", parse_coord)?;
                match engine.shoot(coord) {
                    Ok(outcome) => {
                        writeln!(self.output, "{}", outcome)?;
                        writeln!(self.output, "{}", ui::sunk_summary(engine.board(side.other())))?;
                        break;
                    }
                    Err(GameError::Board(BoardError::AlreadyShot(c))) => {
                        writeln!(self.output, "Error: {}", InputError::RepeatedShot(c))?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }

        writeln!(self.output)?;
        writeln!(self.output, "-----------------------Game Over----------------------")?;
        write!(self.output, "{}", ui::render_board(engine.board(Side::One), true))?;
        write!(self.output, "{}", ui::render_board(engine.board(Side::Two), true))?;
        let message = match (engine.status(), solo) {
            (GameStatus::Draw, true) => "All of your ships and the CPU's ships have sunk.\nDraw!",
            (GameStatus::Draw, false) => "All of Player 1's and Player 2's ships have sunk.\nDraw!",
            (GameStatus::Won(Side::One), true) => "All of the CPU's ships have sunk.\nYou win!",
            (GameStatus::Won(Side::Two), true) => "All your ships have sunk.\nThe CPU wins!",
            (GameStatus::Won(Side::One), false) => "All of Player 2's ships have sunk.\nPlayer 1 wins!",
            (GameStatus::Won(Side::Two), false) => "All of Player 1's ships have sunk.\nPlayer 2 wins!",
            (GameStatus::InProgress, _) => "",
        };
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Prompt until `parse` accepts the answer.
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> anyhow::Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(err) => writeln!(self.output, "Error: {}", err)?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
