//! CLI module: `accountdb serve` boots the HTTP server; `accountdb explain`
//! plans a single filter query as a diagnostic, without binding a socket.

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::run_command;
pub use errors::{CliError, CliResult};
