//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] lingo_storage::StorageError),

    #[error("Record error: {0}")]
    Record(#[from] lingo_records::RecordError),

    #[error("Learning error: {0}")]
    Learning(#[from] lingo_learning::LearningError),

    #[error("Nickname must not be empty")]
    EmptyNickname,
}
