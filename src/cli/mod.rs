//! Command shell over a budget state: interactive via rustyline, or reading
//! commands from stdin in script mode.

pub mod commands;
pub mod context;
pub mod output;
pub mod shell;
pub mod system_clock;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
