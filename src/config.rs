use alloc::vec::Vec;
use core::time::Duration;

use crate::state::Side;

pub const BOARD_SIZE: usize = 10;
/// Ship sizes of one fleet, placed in this order.
pub const FLEET_SIZES: [usize; 10] = [5, 4, 3, 3, 3, 2, 2, 2, 1, 1];
pub const NUM_SHIPS: usize = FLEET_SIZES.len();
pub const TOTAL_SHIP_CELLS: usize = total_cells(&FLEET_SIZES);

const fn total_cells(sizes: &[usize]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < sizes.len() {
        total += sizes[i];
        i += 1;
    }
    total
}

/// Delay before the automated opponent answers a shot.
pub const OPPONENT_DELAY_MS: u64 = 100;
/// Random anchors tried per ship before fleet generation gives up.
pub const MAX_ANCHOR_ATTEMPTS: usize = 10_000;

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet_sizes: Vec<usize>,
    pub opponent_delay: Duration,
    pub max_anchor_attempts: usize,
    /// Turn used by the initial reset.
    pub first_turn: Side,
    /// Whether the session answers opponent turns on its own.
    pub auto_opponent: bool,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            fleet_sizes: FLEET_SIZES.to_vec(),
            opponent_delay: Duration::from_millis(OPPONENT_DELAY_MS),
            max_anchor_attempts: MAX_ANCHOR_ATTEMPTS,
            first_turn: Side::Player,
            auto_opponent: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_fleet_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.fleet_sizes = sizes.into();
        self
    }

    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay = delay;
        self
    }

    pub fn with_max_anchor_attempts(mut self, attempts: usize) -> Self {
        self.max_anchor_attempts = attempts;
        self
    }

    pub fn with_first_turn(mut self, turn: Side) -> Self {
        self.first_turn = turn;
        self
    }

    pub fn with_auto_opponent(mut self, enabled: bool) -> Self {
        self.auto_opponent = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
