//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded: {used} of {quota} bytes used, write needs {requested}")]
    QuotaExceeded {
        quota: usize,
        used: usize,
        requested: usize,
    },
}
