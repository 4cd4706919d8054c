//! Ship geometry: a straight, one-cell-wide segment on the board.

use core::fmt;

use crate::error::FleetError;
use crate::state::Coordinate;

/// A ship spanning `upper_left..=lower_right`. Both corners share a row or a
/// column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    upper_left: Coordinate,
    lower_right: Coordinate,
}

impl Ship {
    /// Build a ship between two end cells given in any order.
    pub fn new(a: Coordinate, b: Coordinate) -> Result<Self, FleetError> {
        if a.row != b.row && a.col != b.col {
            return Err(FleetError::NotStraight);
        }
        Ok(Ship {
            upper_left: Coordinate::new(a.row.min(b.row), a.col.min(b.col)),
            lower_right: Coordinate::new(a.row.max(b.row), a.col.max(b.col)),
        })
    }

    pub fn upper_left(&self) -> Coordinate {
        self.upper_left
    }

    pub fn lower_right(&self) -> Coordinate {
        self.lower_right
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        (self.lower_right.row - self.upper_left.row) + (self.lower_right.col - self.upper_left.col) + 1
    }

    pub fn is_vertical(&self) -> bool {
        self.upper_left.col == self.lower_right.col && self.upper_left.row != self.lower_right.row
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        (self.upper_left.row..=self.lower_right.row).contains(&at.row)
            && (self.upper_left.col..=self.lower_right.col).contains(&at.col)
    }

    /// Cells covered, from the upper-left end.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let (ul, lr) = (self.upper_left, self.lower_right);
        (ul.row..=lr.row).flat_map(move |r| (ul.col..=lr.col).map(move |c| Coordinate::new(r, c)))
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ from: {}, to: {}, len: {} }}",
            self.upper_left,
            self.lower_right,
            self.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn corners_are_normalized() {
        let ship = Ship::new(Coordinate::new(4, 7), Coordinate::new(4, 3)).unwrap();
        assert_eq!(ship.upper_left(), Coordinate::new(4, 3));
        assert_eq!(ship.lower_right(), Coordinate::new(4, 7));
        assert_eq!(ship.len(), 5);
        assert!(!ship.is_vertical());
    }

    #[test]
    fn cells_and_contains() {
        let ship = Ship::new(Coordinate::new(0, 0), Coordinate::new(3, 0)).unwrap();
        let cells: Vec<_> = ship.cells().collect();
        assert_eq!(
            cells,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0),
                Coordinate::new(3, 0)
            ]
        );
        assert!(ship.contains(Coordinate::new(2, 0)));
        assert!(!ship.contains(Coordinate::new(4, 0)));
        assert!(ship.is_vertical());
    }

    #[test]
    fn single_cell_ship() {
        let ship = Ship::new(Coordinate::new(5, 5), Coordinate::new(5, 5)).unwrap();
        assert_eq!(ship.len(), 1);
        assert_eq!(ship.cells().count(), 1);
    }

    #[test]
    fn diagonal_is_rejected() {
        assert_eq!(
            Ship::new(Coordinate::new(0, 0), Coordinate::new(1, 1)),
            Err(FleetError::NotStraight)
        );
    }
}
