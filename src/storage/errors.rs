//! Bulk-load errors. All of these are boot-time fatal: the engine never
//! partially loads (§1 Non-goals — no mutation/partial-service mode).

use std::fmt;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Clone)]
pub enum StorageError {
    DuplicateId(u32),
    InvalidSex { id: u32, value: String },
    InvalidStatus { id: u32, value: String },
    DictionaryCapacity { field: &'static str, value: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DuplicateId(id) => write!(f, "duplicate account id {id}"),
            StorageError::InvalidSex { id, value } => {
                write!(f, "account {id} has invalid sex {value:?}")
            }
            StorageError::InvalidStatus { id, value } => {
                write!(f, "account {id} has invalid status {value:?}")
            }
            StorageError::DictionaryCapacity { field, value } => write!(
                f,
                "dictionary for {field} overflowed interning {value:?}"
            ),
        }
    }
}

impl std::error::Error for StorageError {}
