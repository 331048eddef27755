//! Demo autopilot
//!
//! Steers Santa under the falling present for the headless native demo.

use super::state::GameState;
use super::tick::TickInput;

/// Pick direction flags that move Santa's centre toward the present's centre.
///
/// Holds still once within one move step, so Santa doesn't jitter.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let (_, move_speed) = state.config.difficulty.speeds_for(state.score);
    let target = state.object.rect().center().x;
    let current = state.character.rect().center().x;
    let delta = target - current;

    TickInput {
        left: delta < -move_speed,
        right: delta > move_speed,
    }
}
