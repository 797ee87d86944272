//! Learning record error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearningError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Record store error: {0}")]
    Record(#[from] lingo_records::RecordError),
}
