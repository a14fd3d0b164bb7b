//! Line-oriented shell over a [`Transcript`](crate::domain::Transcript).
//!
//! Interactive sessions use rustyline; setting `MOADALY_CLI_SCRIPT` reads
//! commands from stdin instead, one per line.

pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, ShellContext, SCRIPT_ENV};
pub use shell::run_cli;
