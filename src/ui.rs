#![cfg(feature = "std")]

use std::fmt::Write;

use crate::grid::{Cell, Grid};
use crate::score::Score;
use crate::state::{GameState, Side};

fn cell_char(cell: Cell, reveal: bool) -> char {
    match cell {
        Cell::Touched => 'X',
        Cell::Missed => 'o',
        Cell::Boat if reveal => 'S',
        Cell::Boat | Cell::Water => '.',
    }
}

/// Render a grid with column letters and 1-based row numbers. Unshot boats
/// are only drawn when `reveal` is set.
pub fn render_grid(grid: &Grid, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..grid.size() {
        let ch = u8::try_from(c)
            .ok()
            .filter(|c| *c < 26)
            .map_or('?', |c| (b'A' + c) as char);
        let _ = write!(out, " {}", ch);
    }
    out.push('\n');
    for (r, row) in grid.rows().enumerate() {
        let _ = write!(out, " {:>3}", r + 1);
        for cell in row {
            let _ = write!(out, " {}", cell_char(*cell, reveal));
        }
        out.push('\n');
    }
    out
}

pub fn render_score(label: &str, score: &Score) -> String {
    format!(
        "{}: {} shots, {} hits, {} misses, {} sunk, {} afloat",
        label, score.shots_fired, score.hits, score.misses, score.ships_sunk, score.ships_afloat
    )
}

/// Both boards as the human player sees them: own fleet revealed, enemy
/// fleet hidden.
pub fn render_state(state: &GameState) -> String {
    let mut out = String::new();
    out.push_str("Enemy waters\n");
    out.push_str(&render_grid(&state.opponent.grid, false));
    out.push_str(&render_score("  you", &state.score(Side::Player)));
    out.push_str("\n\nYour fleet\n");
    out.push_str(&render_grid(&state.player.grid, true));
    out.push_str(&render_score("  enemy", &state.score(Side::Opponent)));
    out.push('\n');
    let _ = writeln!(out, "Turn: {}", state.turn);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::Fleet;
    use crate::grid::project;
    use crate::ship::Ship;
    use crate::state::Coordinate;

    fn grid() -> Grid {
        let fleet = Fleet::new(vec![
            Ship::new(Coordinate::new(0, 0), Coordinate::new(0, 1)).unwrap(),
        ]);
        project(3, &fleet, &[Coordinate::new(0, 0), Coordinate::new(2, 2)])
    }

    #[test]
    fn hidden_boats_render_as_water() {
        let text = render_grid(&grid(), false);
        assert_eq!(text, "     A B C\n   1 X . .\n   2 . . .\n   3 . . o\n");
    }

    #[test]
    fn revealed_boats_render_as_ships() {
        let text = render_grid(&grid(), true);
        assert!(text.contains("   1 X S ."));
    }
}
