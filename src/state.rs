//! Game state snapshots shared between the resolver, the session and
//! subscribers.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::ParseCoordinateError;
use crate::fleet::Fleet;
use crate::grid::{project, Grid};
use crate::score::Score;

/// A board cell, `row` and `col` both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self, board_size: usize) -> bool {
        self.row < board_size && self.col < board_size
    }
}

/// Board notation: column letter then 1-based row, e.g. `C4` is row 3, col 2.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.col).ok().filter(|c| *c < 26) {
            Some(c) => write!(f, "{}{}", (b'A' + c) as char, self.row + 1),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let mut chars = input.chars();
        let col_ch = chars
            .next()
            .ok_or(ParseCoordinateError::Empty)?
            .to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(ParseCoordinateError::InvalidColumn(col_ch));
        }
        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| ParseCoordinateError::InvalidRow)?;
        if row == 0 {
            return Err(ParseCoordinateError::InvalidRow);
        }
        Ok(Coordinate::new(row - 1, (col_ch as u8 - b'A') as usize))
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// A request by `order_from` to fire at `at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotCommand {
    pub order_from: Side,
    pub at: Coordinate,
}

impl ShotCommand {
    pub fn new(order_from: Side, at: Coordinate) -> Self {
        Self { order_from, at }
    }
}

/// A player's fleet and the shots that player has fired, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerData {
    pub ships: Arc<Fleet>,
    pub shots: Vec<Coordinate>,
}

impl PlayerData {
    /// Fresh data for a fleet with no shots fired yet.
    pub fn new(fleet: Fleet) -> Self {
        Self {
            ships: Arc::new(fleet),
            shots: Vec::new(),
        }
    }
}

/// What gets rendered for one side: its data and its board as seen under
/// the other side's shots.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantView {
    pub data: PlayerData,
    pub grid: Grid,
}

/// Canonical snapshot of a game. Transitions never mutate a published
/// snapshot; they build a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub turn: Side,
    pub player: Arc<ParticipantView>,
    pub opponent: Arc<ParticipantView>,
}

impl GameState {
    /// Build a snapshot from raw player data, deriving both grids.
    pub fn new(turn: Side, board_size: usize, player: PlayerData, opponent: PlayerData) -> Self {
        let player_grid = project(board_size, &player.ships, &opponent.shots);
        let opponent_grid = project(board_size, &opponent.ships, &player.shots);
        Self {
            turn,
            player: Arc::new(ParticipantView {
                data: player,
                grid: player_grid,
            }),
            opponent: Arc::new(ParticipantView {
                data: opponent,
                grid: opponent_grid,
            }),
        }
    }

    pub fn view(&self, side: Side) -> &ParticipantView {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    /// Cells of the other side's board that `side` has not fired at yet.
    pub fn targets_for(&self, side: Side) -> impl Iterator<Item = Coordinate> + '_ {
        self.view(side.other()).grid.unshot_cells()
    }

    /// Tally of `side`'s shots against the other side's fleet.
    pub fn score(&self, side: Side) -> Score {
        let defender = self.view(side.other());
        Score::tally(&defender.data.ships, &defender.grid, self.view(side).data.shots.len())
    }

    /// The side that has touched every cell of the other fleet, if any.
    /// Purely derived: the resolver keeps accepting shots after a win.
    pub fn winner(&self) -> Option<Side> {
        [Side::Player, Side::Opponent]
            .into_iter()
            .find(|side| self.score(*side).is_complete())
    }
}
