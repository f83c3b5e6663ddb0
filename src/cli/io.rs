//! JSON output for the `explain` diagnostic command.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Writes a single JSON value to stdout, one line, flushed immediately —
/// the same "one JSON object per write" convention the HTTP layer's
/// response cache relies on for its stored bodies.
pub fn write_response(value: Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
