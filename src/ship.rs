//! Ship definitions: the fixed roster of ship codes and per-board ship health.

use core::fmt;

/// Type of ship, identified by its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShipCode {
    Carrier,
    Battleship,
    Destroyer,
    Submarine,
    PatrolBoat,
}

impl ShipCode {
    pub const ALL: [ShipCode; 5] = [
        ShipCode::Carrier,
        ShipCode::Battleship,
        ShipCode::Destroyer,
        ShipCode::Submarine,
        ShipCode::PatrolBoat,
    ];

    /// Ship's name.
    pub fn name(self) -> &'static str {
        match self {
            ShipCode::Carrier => "Carrier",
            ShipCode::Battleship => "Battleship",
            ShipCode::Destroyer => "Destroyer",
            ShipCode::Submarine => "Submarine",
            ShipCode::PatrolBoat => "Patrol Boat",
        }
    }

    /// Ship's length.
    pub const fn length(self) -> usize {
        match self {
            ShipCode::Carrier => 5,
            ShipCode::Battleship => 4,
            ShipCode::Destroyer | ShipCode::Submarine => 3,
            ShipCode::PatrolBoat => 2,
        }
    }

    /// Letter used on boards and in board files.
    pub fn symbol(self) -> char {
        match self {
            ShipCode::Carrier => 'C',
            ShipCode::Battleship => 'B',
            ShipCode::Destroyer => 'D',
            ShipCode::Submarine => 'S',
            ShipCode::PatrolBoat => 'P',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<ShipCode> {
        ShipCode::ALL
            .into_iter()
            .find(|code| code.symbol() == symbol.to_ascii_uppercase())
    }

    /// Stable index into per-ship arrays.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ShipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A ship on one board. Its length is fixed by its code; health counts the
/// segments not yet hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    code: ShipCode,
    health: usize,
}

impl Ship {
    /// A fresh, undamaged ship.
    pub fn new(code: ShipCode) -> Self {
        Self {
            code,
            health: code.length(),
        }
    }

    pub fn code(&self) -> ShipCode {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.code.name()
    }

    pub fn length(&self) -> usize {
        self.code.length()
    }

    pub fn health(&self) -> usize {
        self.health
    }

    pub fn is_sunk(&self) -> bool {
        self.health == 0
    }

    /// Register a hit on one of this ship's segments. Returns `true` if the
    /// hit sank the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        debug_assert!(self.health > 0, "{} hit after sinking", self.name());
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }
}
