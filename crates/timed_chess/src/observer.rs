//! Terminal rendering of table notifications.

use timed_chess_core::{GameEvent, GameObserver};
use tracing::{debug, warn};

/// Prints every notification to stdout, as text or JSON lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalObserver {
    json: bool,
}

impl TerminalObserver {
    /// Creates an observer printing text, or JSON when `json` is set.
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Renders one event as a single line.
    pub fn render(&self, event: &GameEvent) -> String {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => return line,
                Err(e) => warn!(error = %e, "Failed to encode event"),
            }
        }
        event.to_string()
    }

    /// Whether an event is worth a line on screen.
    ///
    /// Text mode shows the clock every ten seconds and for the last five;
    /// JSON mode shows everything.
    pub fn shows(&self, event: &GameEvent) -> bool {
        match event {
            GameEvent::ClockChanged { seconds } if !self.json => {
                seconds % 10 == 0 || *seconds <= 5
            }
            _ => true,
        }
    }
}

impl GameObserver for TerminalObserver {
    fn notify(&mut self, event: &GameEvent) {
        debug!(%event, "Table event");
        if self.shows(event) {
            println!("{}", self.render(event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timed_chess_core::{Cell, MoveError, Side};

    #[test]
    fn test_text_rendering() {
        let observer = TerminalObserver::new(false);
        assert_eq!(
            observer.render(&GameEvent::TurnChanged { side: Side::Black }),
            "Turn: Black"
        );
        assert_eq!(
            observer.render(&GameEvent::ClockChanged { seconds: 42 }),
            "Clock: 42s"
        );
    }

    #[test]
    fn test_text_mode_thins_out_the_clock() {
        let text = TerminalObserver::new(false);
        assert!(text.shows(&GameEvent::ClockChanged { seconds: 60 }));
        assert!(!text.shows(&GameEvent::ClockChanged { seconds: 47 }));
        assert!(text.shows(&GameEvent::ClockChanged { seconds: 3 }));

        let json = TerminalObserver::new(true);
        assert!(json.shows(&GameEvent::ClockChanged { seconds: 47 }));
    }

    #[test]
    fn test_json_rendering() {
        let observer = TerminalObserver::new(true);
        let line = observer.render(&GameEvent::MoveRejected {
            reason: MoveError::SelfCapture(Cell::new(1, 7)),
        });
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "move_rejected");
        assert_eq!(value["reason"]["SelfCapture"]["column"], 1);
    }
}
