//! Lingo Record Store
//!
//! Namespaced persistence facade over a key-value backend:
//! - every logical key is prefixed with the active user id
//! - records are wrapped in a versioned envelope
//! - log-like collections are capped, newest first
//! - a missing or unreadable record reads as its default

mod envelope;
mod error;
mod identity;
mod keys;
mod store;

pub use envelope::{decode, encode, DecodeError, SCHEMA_VERSION};
pub use error::RecordError;
pub use identity::UserIdentity;
pub use keys::{RecordKey, LEGACY_KEYS};
pub use store::{Identified, RecordStore};

pub use lingo_storage::{KeyValueStore, StorageError};

pub type Result<T> = std::result::Result<T, RecordError>;
