//! Common types for Battleship: coordinates, directions, shot outcomes and
//! board errors.

use core::fmt;

use thiserror::Error;

use crate::config::BOARD_SIZE;
use crate::ship::ShipCode;

/// A cell position on a board. `x` is the column (`A`..`J`), `y` the row
/// (`1`..`10`), both zero based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns `true` when the coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// The coordinate `distance` cells away in `dir`, or `None` when that
    /// would leave the board.
    pub fn offset(&self, dir: Direction, distance: usize) -> Option<Coordinate> {
        let (x, y) = match dir {
            Direction::Up => (Some(self.x), self.y.checked_sub(distance)),
            Direction::Down => (Some(self.x), self.y.checked_add(distance)),
            Direction::Left => (self.x.checked_sub(distance), Some(self.y)),
            Direction::Right => (self.x.checked_add(distance), Some(self.y)),
        };
        let next = Coordinate::new(x?, y?);
        next.in_bounds().then_some(next)
    }

    /// The adjacent coordinate in `dir`.
    pub fn step(&self, dir: Direction) -> Option<Coordinate> {
        self.offset(dir, 1)
    }

    /// In-bounds orthogonal neighbors, in `Direction::ALL` order.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Coordinate)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir).map(|c| (dir, c)))
    }

    /// Row-major iterator over every coordinate of the board.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coordinate::new(x, y)))
    }
}

impl fmt::Display for Coordinate {
    /// Player-facing notation, e.g. `A1` or `J10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.x as u8) as char;
        write!(f, "{}{}", col, self.y + 1)
    }
}

/// One of the four board directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction of travel from `from` to `to`. The row is compared before
    /// the column; equal coordinates have no direction.
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Direction> {
        if to.y < from.y {
            Some(Direction::Up)
        } else if to.y > from.y {
            Some(Direction::Down)
        } else if to.x < from.x {
            Some(Direction::Left)
        } else if to.x > from.x {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Direction in which a ship extends from its origin.
    pub fn forward(self) -> Direction {
        match self {
            Orientation::Horizontal => Direction::Right,
            Orientation::Vertical => Direction::Down,
        }
    }
}

/// Result of a single shot resolved against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The shot hit open water.
    Miss,
    /// The shot hit the given ship, which is still afloat.
    Hit(ShipCode),
    /// The shot hit the given ship and reduced its health to zero.
    Sunk(ShipCode),
}

impl ShotOutcome {
    /// The ship that was struck, if any.
    pub fn ship(&self) -> Option<ShipCode> {
        match *self {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit(code) | ShotOutcome::Sunk(code) => Some(code),
        }
    }

    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Miss => write!(f, "Miss."),
            ShotOutcome::Hit(code) => write!(f, "Hit. {}.", code.name()),
            ShotOutcome::Sunk(code) => write!(f, "Hit and sunk. {}.", code.name()),
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    /// A shot was already fired at this position.
    #[error("{0} has already been shot")]
    AlreadyShot(Coordinate),
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    /// Ship would extend past the edge of the board.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Attempted to place a ship that is already placed.
    #[error("{0:?} is already placed on the board")]
    ShipAlreadyPlaced(ShipCode),
    /// Random placement could not find room for a ship.
    #[error("unable to place {0:?}")]
    UnableToPlaceShip(ShipCode),
}
