//! Dictionary errors.

use std::fmt;

pub type DictionaryResult<T> = Result<T, DictionaryError>;

/// Dictionary errors. These only occur during bulk load.
#[derive(Debug, Clone)]
pub enum DictionaryError {
    /// More distinct values were seen than the column's id width allows.
    Capacity { value: String, max: usize },
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::Capacity { value, max } => write!(
                f,
                "dictionary capacity exceeded (max {max} distinct values) interning {value:?}"
            ),
        }
    }
}

impl std::error::Error for DictionaryError {}
