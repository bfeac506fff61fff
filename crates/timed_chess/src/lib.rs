//! Timed Chess - terminal host for the chess table.
//!
//! Wires a [`timed_chess_core::GameSession`] to stdin and a one-second
//! timer, printing notifications as they happen.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod config;
mod input;
mod observer;

pub use app::{Flow, TerminalApp};
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use input::{Command as InputCommand, InputError, parse_command};
pub use observer::TerminalObserver;
