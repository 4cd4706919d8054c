//! Random fleet placement.
//!
//! Ships are placed one at a time in the configured order. Each ship draws a
//! random anchor cell and tries the four directions in random order; the
//! first direction whose cells are all free and on the board wins. A failed
//! anchor is discarded and a new one drawn. Ships already placed are never
//! moved.

use alloc::vec;
use alloc::vec::Vec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::error::FleetError;
use crate::ship::Ship;
use crate::state::Coordinate;

/// The ships of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(ships: Vec<Ship>) -> Self {
        Self { ships }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Ship covering `at`, if any.
    pub fn ship_at(&self, at: Coordinate) -> Option<&Ship> {
        self.ships.iter().find(|s| s.contains(at))
    }

    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(Ship::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    const ALL: [Direction; 4] = [Direction::Down, Direction::Up, Direction::Right, Direction::Left];

    /// Cell `n` steps away from `from`, if it stays on the board.
    fn step(self, from: Coordinate, n: usize, board_size: usize) -> Option<Coordinate> {
        let (row, col) = match self {
            Direction::Down => (from.row.checked_add(n)?, from.col),
            Direction::Up => (from.row.checked_sub(n)?, from.col),
            Direction::Right => (from.row, from.col.checked_add(n)?),
            Direction::Left => (from.row, from.col.checked_sub(n)?),
        };
        let at = Coordinate::new(row, col);
        at.in_bounds(board_size).then_some(at)
    }
}

/// Occupancy of a square board during placement.
struct Occupancy {
    size: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    fn is_free(&self, at: Coordinate) -> bool {
        !self.cells[at.row * self.size + at.col]
    }

    fn mark(&mut self, at: Coordinate) {
        self.cells[at.row * self.size + at.col] = true;
    }
}

/// Places fleets of a fixed size list on a square board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetGenerator {
    board_size: usize,
    sizes: Vec<usize>,
    max_anchor_attempts: usize,
}

impl FleetGenerator {
    pub fn new(board_size: usize, sizes: Vec<usize>, max_anchor_attempts: usize) -> Self {
        Self {
            board_size,
            sizes,
            max_anchor_attempts,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.board_size,
            config.fleet_sizes.clone(),
            config.max_anchor_attempts,
        )
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Generate one fleet.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Fleet, FleetError> {
        if let Some(&size) = self
            .sizes
            .iter()
            .find(|&&s| s == 0 || s > self.board_size)
        {
            return Err(FleetError::InvalidSize {
                size,
                board_size: self.board_size,
            });
        }

        let mut occupied = Occupancy::new(self.board_size);
        let mut ships = Vec::with_capacity(self.sizes.len());
        for &size in &self.sizes {
            let ship = self.place(rng, &mut occupied, size)?;
            log::trace!("placed {:?}", ship);
            ships.push(ship);
        }
        Ok(Fleet::new(ships))
    }

    fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupied: &mut Occupancy,
        size: usize,
    ) -> Result<Ship, FleetError> {
        for _ in 0..self.max_anchor_attempts {
            let anchor = Coordinate::new(
                rng.random_range(0..self.board_size),
                rng.random_range(0..self.board_size),
            );
            if !occupied.is_free(anchor) {
                continue;
            }
            let mut directions = Direction::ALL;
            directions.shuffle(rng);
            for dir in directions {
                if let Some(end) = self.free_run(occupied, anchor, dir, size) {
                    for n in 0..size {
                        if let Some(at) = dir.step(anchor, n, self.board_size) {
                            occupied.mark(at);
                        }
                    }
                    return Ship::new(anchor, end);
                }
            }
        }
        Err(FleetError::PlacementExhausted {
            size,
            attempts: self.max_anchor_attempts,
        })
    }

    /// Far end of a `size`-cell run from `anchor` towards `dir` when every
    /// cell of it is on the board and free.
    fn free_run(
        &self,
        occupied: &Occupancy,
        anchor: Coordinate,
        dir: Direction,
        size: usize,
    ) -> Option<Coordinate> {
        let mut end = anchor;
        for n in 0..size {
            let at = dir.step(anchor, n, self.board_size)?;
            if !occupied.is_free(at) {
                return None;
            }
            end = at;
        }
        Some(end)
    }
}

impl Default for FleetGenerator {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn direction_step_stays_on_board() {
        let origin = Coordinate::new(0, 9);
        assert_eq!(Direction::Up.step(origin, 1, 10), None);
        assert_eq!(Direction::Right.step(origin, 1, 10), None);
        assert_eq!(Direction::Down.step(origin, 2, 10), Some(Coordinate::new(2, 9)));
        assert_eq!(Direction::Left.step(origin, 9, 10), Some(Coordinate::new(0, 0)));
    }

    #[test]
    fn invalid_size_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let generator = FleetGenerator::new(4, vec![5], 10);
        assert_eq!(
            generator.generate(&mut rng),
            Err(FleetError::InvalidSize { size: 5, board_size: 4 })
        );
        let generator = FleetGenerator::new(4, vec![0], 10);
        assert!(generator.generate(&mut rng).is_err());
    }

    #[test]
    fn overfull_board_exhausts_attempts() {
        let mut rng = SmallRng::seed_from_u64(3);
        // five cells cannot fit on a 2x2 board
        let generator = FleetGenerator::new(2, vec![2, 2, 1], 50);
        assert_eq!(
            generator.generate(&mut rng),
            Err(FleetError::PlacementExhausted { size: 1, attempts: 50 })
        );
    }

    #[test]
    fn exact_fit_board_is_filled() {
        let mut rng = SmallRng::seed_from_u64(9);
        let generator = FleetGenerator::new(1, vec![1], 10);
        let fleet = generator.generate(&mut rng).unwrap();
        assert_eq!(fleet.ships(), &[Ship::new(Coordinate::new(0, 0), Coordinate::new(0, 0)).unwrap()]);
    }
}
