//! CLI error type: wraps every boot-time failure (config, archive, bulk
//! load, I/O) behind one enum so `main.rs` has a single place to report a
//! JSON error object and exit non-zero.

use std::fmt;

use crate::archive::ArchiveError;
use crate::config::ConfigError;
use crate::storage::StorageError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Archive(ArchiveError),
    Storage(StorageError),
    Io(std::io::Error),
    Boot(String),
}

impl CliError {
    pub fn boot_failed(message: impl Into<String>) -> Self {
        CliError::Boot(message.into())
    }

    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::Archive(_) => "ARCHIVE_ERROR",
            CliError::Storage(_) => "STORAGE_ERROR",
            CliError::Io(_) => "IO_ERROR",
            CliError::Boot(_) => "BOOT_FAILED",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{e}"),
            CliError::Archive(e) => write!(f, "{e}"),
            CliError::Storage(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Boot(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<ArchiveError> for CliError {
    fn from(e: ArchiveError) -> Self {
        CliError::Archive(e)
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Storage(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Boot(format!("JSON error: {e}"))
    }
}
