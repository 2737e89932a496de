//! Board files: ten lines of ten whitespace-separated tokens, each either a
//! ship code (`C`, `B`, `D`, `S`, `P`) or the empty marker `-`.
//!
//! ```text
//! C C C C C - - - - -
//! B - - - - - - - - -
//! B - - D D D - - - -
//! ...
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::board::Board;
use crate::common::{BoardError, Coordinate, Orientation};
use crate::config::{BOARD_SIZE, EMPTY_MARKER, FLEET, NUM_SHIPS};
use crate::ship::ShipCode;

/// Reasons a board file is rejected. Rows and columns are reported one
/// based, as the player sees them.
#[derive(Debug, Error)]
pub enum BoardFileError {
    #[error("could not access board file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("expected 10 rows, found {found}")]
    RowCount { found: usize },
    #[error("row {row}: expected 10 columns, found {found}")]
    ColumnCount { row: usize, found: usize },
    #[error("row {row}, column {column}: unknown token '{token}'")]
    UnknownToken {
        row: usize,
        column: usize,
        token: String,
    },
    #[error("the {0} is missing")]
    MissingShip(ShipCode),
    #[error("the {code} must cover {expected} cells, found {found}")]
    WrongShipSize {
        code: ShipCode,
        expected: usize,
        found: usize,
    },
    #[error("the {0} must be a single straight, unbroken line")]
    NotStraight(ShipCode),
    #[error(transparent)]
    Placement(#[from] BoardError),
}

/// Parse and validate a board file, returning a board with the full fleet
/// placed and no shots fired.
pub fn parse_layout(text: &str) -> Result<Board, BoardFileError> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if rows.len() != BOARD_SIZE {
        return Err(BoardFileError::RowCount { found: rows.len() });
    }

    let mut found: [Vec<Coordinate>; NUM_SHIPS] = Default::default();
    for (y, line) in rows.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != BOARD_SIZE {
            return Err(BoardFileError::ColumnCount {
                row: y + 1,
                found: tokens.len(),
            });
        }
        for (x, token) in tokens.into_iter().enumerate() {
            match parse_token(token) {
                Some(None) => {}
                Some(Some(code)) => found[code.index()].push(Coordinate::new(x, y)),
                None => {
                    return Err(BoardFileError::UnknownToken {
                        row: y + 1,
                        column: x + 1,
                        token: token.to_string(),
                    })
                }
            }
        }
    }

    let mut board = Board::new();
    for code in FLEET {
        let cells = &found[code.index()];
        let (origin, orientation) = ship_shape(code, cells)?;
        board.place(code, origin, orientation)?;
    }
    Ok(board)
}

/// `Some(None)` for the empty marker, `Some(Some(code))` for a ship code,
/// `None` for anything else.
fn parse_token(token: &str) -> Option<Option<ShipCode>> {
    let mut chars = token.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if ch == EMPTY_MARKER {
        return Some(None);
    }
    ShipCode::from_symbol(ch).map(Some)
}

/// Check that `cells` (in row-major order) form one straight run of the
/// ship's length and return its origin and orientation.
fn ship_shape(
    code: ShipCode,
    cells: &[Coordinate],
) -> Result<(Coordinate, Orientation), BoardFileError> {
    let Some(&origin) = cells.first() else {
        return Err(BoardFileError::MissingShip(code));
    };
    if cells.len() != code.length() {
        return Err(BoardFileError::WrongShipSize {
            code,
            expected: code.length(),
            found: cells.len(),
        });
    }
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let dir = orientation.forward();
        let straight = cells
            .iter()
            .enumerate()
            .all(|(i, &c)| origin.offset(dir, i) == Some(c));
        if straight {
            return Ok((origin, orientation));
        }
    }
    Err(BoardFileError::NotStraight(code))
}

/// Render the ship layout of `board` in board-file format. Shots already
/// fired are ignored; only ship positions are written.
pub fn format_layout(board: &Board) -> String {
    let mut grid = [[EMPTY_MARKER; BOARD_SIZE]; BOARD_SIZE];
    for code in FLEET {
        if let Some(placement) = board.placement(code) {
            for c in placement.cells() {
                grid[c.y][c.x] = code.symbol();
            }
        }
    }
    let mut out = String::with_capacity(BOARD_SIZE * BOARD_SIZE * 2);
    for row in grid.iter() {
        let line: Vec<String> = row.iter().map(char::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Read and validate a board file from disk.
pub fn load_layout(path: impl AsRef<Path>) -> Result<Board, BoardFileError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| BoardFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_layout(&text)
}

/// Write the ship layout of `board` to disk.
pub fn save_layout(board: &Board, path: impl AsRef<Path>) -> Result<(), BoardFileError> {
    let path = path.as_ref();
    fs::write(path, format_layout(board)).map_err(|source| BoardFileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
