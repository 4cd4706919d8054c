//! Visibility grid derived from a fleet and the shots fired at it.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;

use crate::fleet::Fleet;
use crate::state::Coordinate;

/// State of one board cell as seen by the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Cell {
    Water,
    Boat,
    Missed,
    Touched,
}

impl Cell {
    /// `true` once a shot has landed here.
    pub fn is_shot(self) -> bool {
        matches!(self, Cell::Missed | Cell::Touched)
    }

    /// Cell after one more shot. Already shot cells are left as is.
    pub fn shot(self) -> Cell {
        match self {
            Cell::Boat => Cell::Touched,
            Cell::Water => Cell::Missed,
            other => other,
        }
    }
}

/// Square matrix of [`Cell`], indexed as `grid[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-water grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Water; size * size],
        }
    }

    /// Grid with every ship cell of `fleet` set to [`Cell::Boat`].
    pub fn with_fleet(size: usize, fleet: &Fleet) -> Self {
        let mut grid = Self::new(size);
        for at in fleet.ships().iter().flat_map(|s| s.cells()) {
            if let Some(idx) = grid.index_of(at) {
                grid.cells[idx] = Cell::Boat;
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index_of(&self, at: Coordinate) -> Option<usize> {
        at.in_bounds(self.size).then(|| at.row * self.size + at.col)
    }

    pub fn get(&self, at: Coordinate) -> Option<Cell> {
        self.index_of(at).map(|idx| self.cells[idx])
    }

    /// Apply one shot. Off-board shots are ignored.
    pub fn apply_shot(&mut self, at: Coordinate) {
        if let Some(idx) = self.index_of(at) {
            self.cells[idx] = self.cells[idx].shot();
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks panics on zero
        self.cells.chunks(self.size.max(1))
    }

    /// Every cell with its coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Coordinate::new(i / self.size, i % self.size), *c))
    }

    /// Coordinates still showing water or boat.
    pub fn unshot_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.iter().filter(|(_, c)| !c.is_shot()).map(|(at, _)| at)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    /// `true` when no cell is left to fire at.
    pub fn is_exhausted(&self) -> bool {
        self.cells.iter().all(|c| c.is_shot())
    }
}

impl Index<usize> for Grid {
    type Output = [Cell];

    fn index(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }
}

/// Project `fleet` under `shots`, applied in order.
pub fn project(board_size: usize, fleet: &Fleet, shots: &[Coordinate]) -> Grid {
    let mut grid = Grid::with_fleet(board_size, fleet);
    for &at in shots {
        grid.apply_shot(at);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::Ship;

    fn fleet() -> Fleet {
        Fleet::new(vec![
            Ship::new(Coordinate::new(0, 0), Coordinate::new(0, 2)).unwrap(),
            Ship::new(Coordinate::new(5, 5), Coordinate::new(5, 5)).unwrap(),
        ])
    }

    #[test]
    fn ships_show_as_boat() {
        let grid = project(10, &fleet(), &[]);
        assert_eq!(grid.count(Cell::Boat), 4);
        assert_eq!(grid.count(Cell::Water), 96);
        assert_eq!(grid[0][1], Cell::Boat);
        assert_eq!(grid[5][5], Cell::Boat);
    }

    #[test]
    fn shots_touch_or_miss() {
        let grid = project(10, &fleet(), &[Coordinate::new(0, 1), Coordinate::new(9, 9)]);
        assert_eq!(grid[0][1], Cell::Touched);
        assert_eq!(grid[9][9], Cell::Missed);
        assert_eq!(grid.unshot_cells().count(), 98);
    }

    #[test]
    fn off_board_shot_is_ignored() {
        let grid = project(10, &fleet(), &[Coordinate::new(10, 0)]);
        assert_eq!(grid, project(10, &fleet(), &[]));
    }

    #[test]
    fn shot_transitions() {
        assert_eq!(Cell::Water.shot(), Cell::Missed);
        assert_eq!(Cell::Boat.shot(), Cell::Touched);
        assert_eq!(Cell::Missed.shot(), Cell::Missed);
        assert_eq!(Cell::Touched.shot(), Cell::Touched);
    }
}
