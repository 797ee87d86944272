//! In-memory key-value store
//!
//! Used for tests and for ephemeral learners. An optional byte quota
//! reproduces the "storage full" failure of a small browser partition.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::KeyValueStore;
use crate::error::StorageError;
use crate::Result;

#[derive(Default)]
pub struct MemoryStore {
    items: Arc<RwLock<HashMap<String, String>>>,
    /// Maximum total bytes of keys plus values, if bounded
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Bytes currently held, counting both keys and values.
    pub fn used_bytes(&self) -> usize {
        self.items
            .read()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write();

        if let Some(quota) = self.quota {
            let replaced = items.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let used: usize = items.iter().map(|(k, v)| k.len() + v.len()).sum();
            let requested = key.len() + value.len();

            if used - replaced + requested > quota {
                return Err(StorageError::QuotaExceeded {
                    quota,
                    used,
                    requested,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.read().keys().cloned().collect())
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            quota: self.quota,
        }
    }
}
