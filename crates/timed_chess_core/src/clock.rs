//! Per-turn countdown.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default number of seconds each side gets per turn.
pub const DEFAULT_TURN_SECONDS: u32 = 60;

/// Clock settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Seconds on the clock at the start of every turn.
    pub turn_seconds: u32,
}

impl ClockConfig {
    /// Creates a config with the given turn length.
    ///
    /// # Errors
    ///
    /// Returns [`ClockConfigError`] if `turn_seconds` is zero.
    #[instrument]
    pub fn new(turn_seconds: u32) -> Result<Self, ClockConfigError> {
        let config = Self { turn_seconds };
        config.validate()?;
        Ok(config)
    }

    /// Checks that a turn lasts at least one second.
    pub fn validate(&self) -> Result<(), ClockConfigError> {
        if self.turn_seconds == 0 {
            return Err(ClockConfigError {
                turn_seconds: self.turn_seconds,
            });
        }
        Ok(())
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            turn_seconds: DEFAULT_TURN_SECONDS,
        }
    }
}

/// Rejected clock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Turn length must be at least one second, got {}", turn_seconds)]
pub struct ClockConfigError {
    /// The rejected turn length.
    pub turn_seconds: u32,
}

/// What a single tick did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockTick {
    /// The clock went down by one and now shows this many seconds.
    Decremented(u32),
    /// The last second ran out; the turn must change.
    Expired,
}

/// Countdown for the side to move.
///
/// The clock never shows zero: the tick that would reach zero reports
/// [`ClockTick::Expired`] and leaves the value at one until the owner
/// resets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnClock {
    remaining: u32,
    turn_seconds: u32,
}

impl TurnClock {
    /// Creates a full clock.
    pub fn new(config: ClockConfig) -> Self {
        let turn_seconds = config.turn_seconds.max(1);
        Self {
            remaining: turn_seconds,
            turn_seconds,
        }
    }

    /// Seconds left in the current turn.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds granted per turn.
    pub fn turn_seconds(&self) -> u32 {
        self.turn_seconds
    }

    /// Refills the clock.
    pub fn reset(&mut self) {
        self.remaining = self.turn_seconds;
    }

    /// Advances the clock by one second.
    pub fn tick(&mut self) -> ClockTick {
        if self.remaining <= 1 {
            ClockTick::Expired
        } else {
            self.remaining -= 1;
            ClockTick::Decremented(self.remaining)
        }
    }
}

impl Default for TurnClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_then_expires() {
        let mut clock = TurnClock::new(ClockConfig::new(3).unwrap());
        assert_eq!(clock.tick(), ClockTick::Decremented(2));
        assert_eq!(clock.tick(), ClockTick::Decremented(1));
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert_eq!(clock.remaining(), 1);

        clock.reset();
        assert_eq!(clock.remaining(), 3);
    }

    #[test]
    fn test_zero_turn_length_rejected() {
        assert_eq!(ClockConfig::new(0), Err(ClockConfigError { turn_seconds: 0 }));
        assert_eq!(ClockConfig::default().turn_seconds, 60);
    }
}
