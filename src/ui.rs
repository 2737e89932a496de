use core::fmt::Write;

use crate::{
    ai::ProbabilityBoard,
    board::{Board, Cell},
    common::Coordinate,
    config::{BOARD_SIZE, EMPTY_MARKER, NUM_SHIPS},
    game::{GameEngine, Side},
};

const HIT_MARKER: char = 'X';
const MISS_MARKER: char = 'O';

fn column_header(width: usize) -> String {
    let mut out = String::from("    ");
    for c in 0..BOARD_SIZE {
        let ch = (b'A' + c as u8) as char;
        let _ = write!(out, " {:>width$}", ch);
    }
    out.push('\n');
    out
}

/// Render a board. With `reveal` the ship codes of unshot ship cells are
/// shown, otherwise they look like empty water.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = column_header(1);
    out.push_str("   ");
    out.push_str(&"-".repeat(BOARD_SIZE * 2 + 1));
    out.push('\n');
    for y in 0..BOARD_SIZE {
        let _ = write!(out, "{:>2} |", y + 1);
        for x in 0..BOARD_SIZE {
            let ch = match board.cell(Coordinate::new(x, y)) {
                Some(Cell::Hit) => HIT_MARKER,
                Some(Cell::Miss) => MISS_MARKER,
                Some(Cell::Ship(code)) if reveal => code.symbol(),
                _ => EMPTY_MARKER,
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Running tally of the ships lost on `board`.
pub fn sunk_summary(board: &Board) -> String {
    let sunk = board.ships().filter(|s| s.is_sunk()).count();
    format!("Ships sunk: {}/{}", sunk, NUM_SHIPS)
}

/// The view `side` plays with: the opponent board on top, its own fleet
/// below.
pub fn render_player_view(engine: &GameEngine, side: Side) -> String {
    let opponent = engine.board(side.other());
    let own = engine.board(side);
    format!(
        "Opponent board:\n{}{}\n\nYour board:\n{}{}\n",
        render_board(opponent, false),
        sunk_summary(opponent),
        render_board(own, true),
        sunk_summary(own),
    )
}

/// Render the per-cell placement counts behind a cold shot.
pub fn render_probability_board(matrix: &ProbabilityBoard) -> String {
    let mut out = String::from("Probability board:\n");
    out.push_str(&column_header(3));
    for (y, row) in matrix.iter().enumerate() {
        let _ = write!(out, "{:>2} |", y + 1);
        for score in row.iter() {
            let _ = write!(out, " {:>3}", score);
        }
        out.push('\n');
    }
    out
}
