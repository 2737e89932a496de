//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, Board, Coordinate, GameEngine, GameError, GameStatus, Player, ShipCode, ShotOutcome,
    Side, Strategy, TargetingEngine,
};
