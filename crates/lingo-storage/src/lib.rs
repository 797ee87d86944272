//! Lingo Storage Layer
//!
//! Key-value persistence backends for learner records.
//! Every backend replaces a key's whole value atomically; there is no
//! partial write and no cross-key transaction.

mod backend;
mod database;
mod error;
mod memory;
mod migrations;

pub use backend::KeyValueStore;
pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;
