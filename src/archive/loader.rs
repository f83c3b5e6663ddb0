//! Reads `data.zip` (§6): an archive of one or more `*.json` files, each
//! `{"accounts": [...]}`. Unknown fields are ignored; this loader performs
//! no validation of account content — that is `crate::storage::builder`'s
//! job. Kept deliberately thin (§1 Non-goals: archive unpacking and JSON
//! decoding are external collaborators, not core engineering surface).

use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use crate::model::RawAccount;
use crate::model::RawAccountFile;

use super::errors::{ArchiveError, ArchiveResult};

/// Reads every `*.json` entry in the zip at `path` and flattens their
/// `accounts` arrays into one `Vec`.
pub fn load_accounts(path: &Path) -> ArchiveResult<Vec<RawAccount>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut accounts = Vec::new();
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if !name.ends_with(".json") {
            continue;
        }
        let parsed: RawAccountFile = serde_json::from_reader(entry)
            .map_err(|source| ArchiveError::Json { file: name, source })?;
        accounts.extend(parsed.accounts);
    }
    Ok(accounts)
}
