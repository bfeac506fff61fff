//! Clock range invariant: the countdown never shows zero.

use super::Invariant;
use crate::GameState;

/// Invariant: remaining seconds lie in `[1, turn_seconds]`.
pub struct ClockRangeInvariant;

impl Invariant<GameState> for ClockRangeInvariant {
    fn holds(state: &GameState) -> bool {
        let clock = state.clock();
        (1..=clock.turn_seconds()).contains(&clock.remaining())
    }

    fn description() -> &'static str {
        "Clock stays between one second and a full turn"
    }
}
