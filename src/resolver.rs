//! Pure shot resolution.

use alloc::sync::Arc;

use crate::error::ShotError;
use crate::grid::project;
use crate::state::{GameState, ParticipantView, ShotCommand, Side};

/// Apply `command` to `state`, producing the next snapshot.
///
/// The shot is appended to the shooter's history, the defender's grid is
/// re-projected from its fleet and the shooter's accumulated shots, and the
/// turn passes to the defender whether the shot hit or not. A command from
/// the side not holding the turn is rejected and `state` is left as is.
pub fn resolve(state: &GameState, command: ShotCommand) -> Result<GameState, ShotError> {
    if command.order_from != state.turn {
        return Err(ShotError::TurnViolation {
            side: command.order_from,
        });
    }

    let shooter = state.turn;
    let defender = shooter.other();
    let shooter_view = state.view(shooter);
    let defender_view = state.view(defender);

    let mut data = shooter_view.data.clone();
    data.shots.push(command.at);
    let grid = project(
        defender_view.grid.size(),
        &defender_view.data.ships,
        &data.shots,
    );

    let shooter_view = Arc::new(ParticipantView {
        data,
        grid: shooter_view.grid.clone(),
    });
    let defender_view = Arc::new(ParticipantView {
        data: defender_view.data.clone(),
        grid,
    });

    let (player, opponent) = match shooter {
        Side::Player => (shooter_view, defender_view),
        Side::Opponent => (defender_view, shooter_view),
    };
    Ok(GameState {
        turn: defender,
        player,
        opponent,
    })
}
