//! Game board state: the cell grid, the ship registry, and the shot resolver.

use core::fmt;

use log::trace;
use rand::Rng;

use crate::common::{BoardError, Coordinate, Orientation, ShotOutcome};
use crate::config::{BOARD_SIZE, EMPTY_MARKER, FLEET, NUM_SHIPS, PLACEMENT_ATTEMPTS};
use crate::ship::{Ship, ShipCode};

/// State of a single board cell.
///
/// A cell only ever moves `Empty -> Miss` or `Ship -> Hit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship(ShipCode),
    Hit,
    Miss,
}

impl Cell {
    /// Returns `true` once a shot has landed on this cell.
    pub fn is_shot(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

/// Where a ship sits: its top/left-most cell and the axis it runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub code: ShipCode,
    pub origin: Coordinate,
    pub orientation: Orientation,
}

impl Placement {
    /// Build a placement, checking that the whole ship fits on the board.
    pub fn new(
        code: ShipCode,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        if !origin.in_bounds() {
            return Err(BoardError::OutOfBounds {
                x: origin.x,
                y: origin.y,
            });
        }
        if origin.offset(orientation.forward(), code.length() - 1).is_none() {
            return Err(BoardError::ShipOutOfBounds);
        }
        Ok(Self {
            code,
            origin,
            orientation,
        })
    }

    /// The cells covered by the ship, starting at the origin.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let dir = self.orientation.forward();
        (0..self.code.length()).filter_map(move |i| self.origin.offset(dir, i))
    }
}

/// One side's board: a 10×10 grid of cells and the ships placed on it.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: [Option<Ship>; NUM_SHIPS],
    placements: [Option<Placement>; NUM_SHIPS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, no shots fired).
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            ships: [None; NUM_SHIPS],
            placements: [None; NUM_SHIPS],
        }
    }

    /// Cell at `coord`, or `None` when out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<Cell> {
        coord.in_bounds().then(|| self.cells[coord.y][coord.x])
    }

    /// Returns `true` when `coord` is on the board and already shot.
    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.cell(coord).is_some_and(Cell::is_shot)
    }

    /// The ship registered under `code`, if placed.
    pub fn ship(&self, code: ShipCode) -> Option<&Ship> {
        self.ships[code.index()].as_ref()
    }

    /// All placed ships, in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn placement(&self, code: ShipCode) -> Option<&Placement> {
        self.placements[code.index()].as_ref()
    }

    /// Returns `true` when every ship of the fleet has been placed.
    pub fn is_fleet_complete(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    /// Number of placed ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.ships().filter(|s| !s.is_sunk()).count()
    }

    /// Returns `true` when no ship is left afloat.
    pub fn all_sunk(&self) -> bool {
        self.ships_remaining() == 0
    }

    /// Number of shots this board has received.
    pub fn shots_received(&self) -> usize {
        Coordinate::all().filter(|&c| self.is_shot(c)).count()
    }

    /// Place the ship `code` starting at `origin` along `orientation`.
    pub fn place(
        &mut self,
        code: ShipCode,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if self.ships[code.index()].is_some() {
            return Err(BoardError::ShipAlreadyPlaced(code));
        }
        let placement = Placement::new(code, origin, orientation)?;
        if placement
            .cells()
            .any(|c| self.cells[c.y][c.x] != Cell::Empty)
        {
            return Err(BoardError::ShipOverlaps);
        }
        for c in placement.cells() {
            self.cells[c.y][c.x] = Cell::Ship(code);
        }
        self.ships[code.index()] = Some(Ship::new(code));
        self.placements[code.index()] = Some(placement);
        Ok(())
    }

    /// Returns a random non-overlapping origin and orientation for `code`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        code: ShipCode,
    ) -> Result<(Coordinate, Orientation), BoardError> {
        let span = BOARD_SIZE - code.length();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (span, BOARD_SIZE - 1),
                Orientation::Vertical => (BOARD_SIZE - 1, span),
            };
            let origin = Coordinate::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            let placement = Placement::new(code, origin, orientation)?;
            if placement
                .cells()
                .all(|c| self.cells[c.y][c.x] == Cell::Empty)
            {
                return Ok((origin, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip(code))
    }

    /// Randomly place every ship of the fleet that is not yet on the board.
    pub fn place_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for code in FLEET {
            if self.ship(code).is_some() {
                continue;
            }
            let (origin, orientation) = self.random_placement(rng, code)?;
            self.place(code, origin, orientation)?;
        }
        Ok(())
    }

    /// Resolve a shot at `coord`, marking the cell and damaging the ship it
    /// strikes. Shooting a cell twice is rejected and leaves the board as is.
    pub fn apply_shot(&mut self, coord: Coordinate) -> Result<ShotOutcome, BoardError> {
        if !coord.in_bounds() {
            return Err(BoardError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            });
        }
        let cell = &mut self.cells[coord.y][coord.x];
        let outcome = match *cell {
            Cell::Hit | Cell::Miss => return Err(BoardError::AlreadyShot(coord)),
            Cell::Empty => {
                *cell = Cell::Miss;
                ShotOutcome::Miss
            }
            Cell::Ship(code) => {
                *cell = Cell::Hit;
                let sunk = self.ships[code.index()]
                    .as_mut()
                    .is_some_and(Ship::register_hit);
                if sunk {
                    ShotOutcome::Sunk(code)
                } else {
                    ShotOutcome::Hit(code)
                }
            }
        };
        trace!("shot at {} -> {:?}", coord, outcome);
        Ok(outcome)
    }

    /// Read-only view of this board as seen by the side shooting at it.
    pub fn target_view(&self) -> TargetView<'_> {
        TargetView { board: self }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ ships: {:?} }}", self.ships)?;
        for row in self.cells.iter() {
            for cell in row.iter() {
                let ch = match cell {
                    Cell::Empty => EMPTY_MARKER,
                    Cell::Ship(code) => code.symbol(),
                    Cell::Hit => 'X',
                    Cell::Miss => 'O',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// What an attacker may know about a board: which cells were shot and what
/// they revealed, plus the length and health of each enemy ship. Unshot
/// ship cells are indistinguishable from water.
#[derive(Clone, Copy)]
pub struct TargetView<'a> {
    board: &'a Board,
}

impl<'a> TargetView<'a> {
    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.board.is_shot(coord)
    }

    pub fn is_hit(&self, coord: Coordinate) -> bool {
        self.board.cell(coord) == Some(Cell::Hit)
    }

    pub fn is_miss(&self, coord: Coordinate) -> bool {
        self.board.cell(coord) == Some(Cell::Miss)
    }

    /// The ship registered under `code`.
    pub fn ship(&self, code: ShipCode) -> Option<&'a Ship> {
        self.board.ship(code)
    }

    /// Ships still afloat.
    pub fn unsunk_ships(&self) -> impl Iterator<Item = &'a Ship> {
        self.board.ships().filter(|s| !s.is_sunk())
    }

    /// Coordinates not yet shot, in row-major order.
    pub fn unshot(&self) -> impl Iterator<Item = Coordinate> + 'a {
        let board = self.board;
        Coordinate::all().filter(move |&c| !board.is_shot(c))
    }
}
