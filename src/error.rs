//! Error types for fleet generation, shot resolution and the game session.

use crate::state::Side;

/// Rejection of a shot command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotError {
    /// The command was issued by a side that does not hold the turn.
    TurnViolation { side: Side },
}

/// Errors returned while building a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    /// A ship size of zero or larger than the board.
    InvalidSize { size: usize, board_size: usize },
    /// No anchor accepted the ship within the configured number of attempts.
    PlacementExhausted { size: usize, attempts: usize },
    /// The two corners given for a ship are neither on one row nor one column.
    NotStraight,
}

/// Errors surfaced by [`GameSession`](crate::GameSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Shot(ShotError),
    Fleet(FleetError),
    /// The session task has stopped.
    Closed,
}

/// Errors returned when parsing a coordinate such as `"C4"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordinateError {
    Empty,
    /// First character is not a column letter.
    InvalidColumn(char),
    /// Row part is missing, not a number, or zero.
    InvalidRow,
}

impl From<ShotError> for SessionError {
    fn from(err: ShotError) -> Self {
        SessionError::Shot(err)
    }
}

impl From<FleetError> for SessionError {
    fn from(err: FleetError) -> Self {
        SessionError::Fleet(err)
    }
}

impl core::fmt::Display for ShotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShotError::TurnViolation { side } => write!(f, "not the turn of {}", side),
        }
    }
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::InvalidSize { size, board_size } => {
                write!(f, "ship size {} does not fit a {}x{} board", size, board_size, board_size)
            }
            FleetError::PlacementExhausted { size, attempts } => write!(
                f,
                "unable to place ship of size {} after {} anchor attempts",
                size, attempts
            ),
            FleetError::NotStraight => write!(f, "ship corners are not on one row or column"),
        }
    }
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Shot(e) => write!(f, "{}", e),
            SessionError::Fleet(e) => write!(f, "fleet generation failed: {}", e),
            SessionError::Closed => write!(f, "game session is closed"),
        }
    }
}

impl core::fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseCoordinateError::Empty => write!(f, "empty coordinate"),
            ParseCoordinateError::InvalidColumn(c) => {
                write!(f, "invalid column '{}' - must be a letter", c)
            }
            ParseCoordinateError::InvalidRow => write!(f, "invalid row - must be a number from 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
#[cfg(feature = "std")]
impl std::error::Error for ParseCoordinateError {}
