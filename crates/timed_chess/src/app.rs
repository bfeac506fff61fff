//! Terminal host: feeds stdin moves and a one-second timer into a session.

use crate::config::AppConfig;
use crate::input::{Command, parse_command};
use crate::observer::TerminalObserver;
use anyhow::{Context, Result};
use timed_chess_core::{Cell, GameSession, InputEvent, SessionSummary};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info, instrument, warn};

/// What the loop should do after handling a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading.
    Continue,
    /// Tear the session down.
    Stop,
}

/// Host for one terminal session.
#[derive(Debug)]
pub struct TerminalApp {
    session: GameSession,
}

impl TerminalApp {
    /// Creates a session from config and attaches the terminal observer.
    #[instrument(skip(config), fields(session_id = %config.session_id()))]
    pub fn new(config: &AppConfig) -> Self {
        let mut session = GameSession::new(config.session_id().clone(), *config.clock());
        session.subscribe(TerminalObserver::new(*config.json()));
        Self { session }
    }

    /// The running session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs until stdin closes or the player quits.
    pub async fn run(self) -> Result<SessionSummary> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin, Duration::from_secs(1)).await
    }

    /// Runs against any line source and tick period.
    ///
    /// Timer ticks and input lines are handled one at a time in the order
    /// they arrive, on this task only.
    pub async fn run_with<R>(mut self, reader: R, period: Duration) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        info!(session_id = %self.session.id(), "Session started");
        println!("{}", self.session.controller().board().display());
        self.prompt();

        let mut lines = reader.lines();
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the clock starts full.
        timer.tick().await;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    let outcome = self.session.tick();
                    debug!(?outcome, "Timer fired");
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        debug!("Input closed");
                        break;
                    };
                    if self.handle_line(&line) == Flow::Stop {
                        break;
                    }
                }
            }
        }

        Ok(self.session.end())
    }

    /// Handles one typed line.
    #[instrument(skip(self))]
    pub fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        match parse_command(line) {
            Ok(Command::Quit) => return Flow::Stop,
            Ok(Command::Board) => println!("{}", self.session.controller().board().display()),
            Ok(Command::Move { from, to }) => self.drag(from, to),
            Err(e) => {
                warn!(error = %e, "Unreadable input");
                println!("{}", e);
            }
        }
        self.prompt();
        Flow::Continue
    }

    // Mirrors a pointer drag: only the side to move can pick a piece up.
    fn drag(&mut self, from: Cell, to: Cell) {
        let controller = self.session.controller();
        if !controller.can_pick_up(from) {
            println!("No {} piece to pick up at {}", controller.current_turn(), from);
            return;
        }
        let piece = match controller.board().piece_at(from) {
            Ok(Some(piece)) => piece.id(),
            _ => return,
        };
        if self
            .session
            .dispatch(InputEvent::DragReleased { piece, from, to })
            .is_ok()
        {
            println!("{}", self.session.controller().board().display());
        }
    }

    fn prompt(&self) {
        let controller = self.session.controller();
        println!(
            "{} to move, {}s left (e.g. 'e2 e4', 'board', 'quit')",
            controller.current_turn(),
            controller.remaining_seconds()
        );
    }
}
