//! Commonly used types and utilities for ease of import.

pub use crate::{
    project, resolve, Cell, Coordinate, FleetGenerator, GameConfig, GameState, Grid, Score,
    ShotCommand, ShotError, Side,
};

#[cfg(feature = "std")]
pub use crate::{GameSession, SessionError};
