//! Parsing of typed commands into table input.

use derive_more::{Display, Error};
use timed_chess_core::Cell;
use tracing::instrument;

/// A line typed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drag the piece on `from` and release it over `to`.
    Move {
        /// Pick-up cell.
        from: Cell,
        /// Release cell.
        to: Cell,
    },
    /// Show the board.
    Board,
    /// End the session.
    Quit,
}

/// Unrecognised input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot read '{}': expected 'e2 e4', '4,6 4,4', 'board' or 'quit'", input)]
pub struct InputError {
    /// The offending line.
    pub input: String,
}

/// Parses one line of player input.
///
/// Cells are either algebraic (`e2`) or raw `column,row` pairs (`4,6`).
/// Raw pairs may lie off the board; the table reports those itself.
#[instrument]
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let error = || InputError {
        input: line.trim().to_string(),
    };

    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["board"] => Ok(Command::Board),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        [from, to] => Ok(Command::Move {
            from: parse_cell(from).ok_or_else(error)?,
            to: parse_cell(to).ok_or_else(error)?,
        }),
        _ => Err(error()),
    }
}

fn parse_cell(word: &str) -> Option<Cell> {
    match word.split_once(',') {
        Some((column, row)) => Some(Cell::new(column.trim().parse().ok()?, row.trim().parse().ok()?)),
        None => Cell::from_algebraic(word),
    }
}
