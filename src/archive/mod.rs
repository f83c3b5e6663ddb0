//! Archive decoding: the thin, dependency-boundary layer between
//! `data.zip` on disk and the `RawAccount` values the core bulk loader
//! consumes. Owns zip extraction and JSON parsing only; it builds no
//! indexes and interns no strings.

mod errors;
mod loader;

pub use errors::{ArchiveError, ArchiveResult};
pub use loader::load_accounts;
