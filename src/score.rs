//! Derived per-side tallies used by score widgets and win detection.

use crate::fleet::Fleet;
use crate::grid::{Cell, Grid};

/// One side's shooting record against the other side's fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Shots fired, duplicates included.
    pub shots_fired: usize,
    /// Distinct ship cells touched.
    pub hits: usize,
    /// Distinct water cells missed.
    pub misses: usize,
    pub ships_sunk: usize,
    pub ships_afloat: usize,
}

impl Score {
    /// Tally from the defender's fleet and its projected grid.
    pub fn tally(defender_fleet: &Fleet, defender_grid: &Grid, shots_fired: usize) -> Self {
        let ships_sunk = defender_fleet
            .ships()
            .iter()
            .filter(|ship| {
                ship.cells()
                    .all(|at| defender_grid.get(at) == Some(Cell::Touched))
            })
            .count();
        Score {
            shots_fired,
            hits: defender_grid.count(Cell::Touched),
            misses: defender_grid.count(Cell::Missed),
            ships_sunk,
            ships_afloat: defender_fleet.len() - ships_sunk,
        }
    }

    /// Every ship of a non-empty fleet has been sunk.
    pub fn is_complete(&self) -> bool {
        self.ships_sunk > 0 && self.ships_afloat == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::project;
    use crate::ship::Ship;
    use crate::state::Coordinate;
    use alloc::vec;

    #[test]
    fn sunk_and_afloat() {
        let fleet = Fleet::new(vec![
            Ship::new(Coordinate::new(0, 0), Coordinate::new(0, 1)).unwrap(),
            Ship::new(Coordinate::new(3, 3), Coordinate::new(3, 3)).unwrap(),
        ]);
        let shots = [
            Coordinate::new(3, 3),
            Coordinate::new(0, 0),
            Coordinate::new(0, 0),
            Coordinate::new(9, 9),
        ];
        let grid = project(10, &fleet, &shots);
        let score = Score::tally(&fleet, &grid, shots.len());
        assert_eq!(
            score,
            Score {
                shots_fired: 4,
                hits: 2,
                misses: 1,
                ships_sunk: 1,
                ships_afloat: 1,
            }
        );
        assert!(!score.is_complete());

        let grid = project(10, &fleet, &[Coordinate::new(3, 3), Coordinate::new(0, 0), Coordinate::new(0, 1)]);
        assert!(Score::tally(&fleet, &grid, 3).is_complete());
    }

    #[test]
    fn empty_fleet_is_never_complete() {
        let fleet = Fleet::default();
        let grid = project(10, &fleet, &[]);
        assert!(!Score::tally(&fleet, &grid, 0).is_complete());
    }
}
