//! CLI argument definitions (SPEC_FULL §CLI & process bootstrap).
//!
//! - `accountdb serve --data-dir <dir>`
//! - `accountdb explain --data-dir <dir> "<query string>"`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "accountdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load options.txt and data.zip, build the index set, and serve HTTP
    /// until terminated.
    Serve {
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Plan a single filter query string and print which indexes and
    /// projection it would use, without starting the server.
    Explain {
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
        /// A raw filter query string, e.g. "sex_eq=f&limit=10".
        query: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
