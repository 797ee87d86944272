//! Record Store
//!
//! Every page reads and writes learner state through a `RecordStore`.
//! The active identity is fixed at construction; switching users means
//! building a new store with `with_identity`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use lingo_storage::KeyValueStore;

use crate::envelope::{decode, encode, rewrap, SCHEMA_VERSION};
use crate::error::RecordError;
use crate::identity::UserIdentity;
use crate::keys::LEGACY_KEYS;
use crate::Result;

/// Records addressable by a string id inside a stored list.
pub trait Identified {
    fn id(&self) -> &str;
}

pub struct RecordStore {
    /// `None` when no storage is available (reads default, writes no-op)
    backend: Option<Arc<dyn KeyValueStore>>,
    identity: UserIdentity,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, identity: UserIdentity) -> Self {
        Self {
            backend: Some(backend),
            identity,
        }
    }

    /// Bind to the installation's persisted identity, creating it on first use.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        let identity = UserIdentity::load_or_create(backend.as_ref())?;
        Ok(Self::new(backend, identity))
    }

    /// A store with no backend, as in a render context without storage.
    pub fn detached(identity: UserIdentity) -> Self {
        Self {
            backend: None,
            identity,
        }
    }

    /// Same backend, different user.
    pub fn with_identity(&self, identity: UserIdentity) -> Self {
        Self {
            backend: self.backend.clone(),
            identity,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.backend.is_none()
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn user_id(&self) -> &str {
        self.identity.as_str()
    }

    pub fn backend(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.backend.as_ref()
    }

    /// `"<userId>_<logicalKey>"`
    pub fn namespaced_key(&self, logical_key: &str) -> String {
        format!("{}_{}", self.identity.as_str(), logical_key)
    }

    /// Read a record, falling back to `default` when storage is missing,
    /// the key is absent, or the stored value cannot be decoded.
    pub fn read<T, K>(&self, key: K, default: T) -> Result<T>
    where
        T: DeserializeOwned,
        K: AsRef<str>,
    {
        let Some(backend) = &self.backend else {
            return Ok(default);
        };

        let key = self.namespaced_key(key.as_ref());
        let Some(raw) = backend.get_item(&key)? else {
            return Ok(default);
        };

        match decode::<T>(&raw) {
            Ok((value, version)) => {
                if version < SCHEMA_VERSION {
                    self.upgrade(backend.as_ref(), &key, &raw, version);
                }
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Unreadable record, using default");
                Ok(default)
            }
        }
    }

    /// Rewrite a pre-envelope value in the current envelope. A failed
    /// rewrite leaves the old value readable, so it is only logged.
    fn upgrade(&self, backend: &dyn KeyValueStore, key: &str, raw: &str, version: u32) {
        let upgraded = rewrap(raw).map_err(RecordError::from).and_then(|wrapped| {
            backend.set_item(key, &wrapped)?;
            Ok(())
        });

        match upgraded {
            Ok(()) => tracing::debug!(key = %key, from = version, "Upgraded record envelope"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Could not upgrade record envelope"),
        }
    }

    pub fn read_or_default<T, K>(&self, key: K) -> Result<T>
    where
        T: DeserializeOwned + Default,
        K: AsRef<str>,
    {
        self.read(key, T::default())
    }

    /// Overwrite a record unconditionally. No-op without a backend.
    pub fn write<T, K>(&self, key: K, value: &T) -> Result<()>
    where
        T: Serialize,
        K: AsRef<str>,
    {
        let Some(backend) = &self.backend else {
            return Ok(());
        };

        let key = self.namespaced_key(key.as_ref());
        let raw = encode(value)?;
        backend.set_item(&key, &raw)?;

        tracing::debug!(key = %key, bytes = raw.len(), "Wrote record");
        Ok(())
    }

    /// Read, apply `f`, write back, and return the new value.
    pub fn update<T, K, F>(&self, key: K, default: T, f: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        K: AsRef<str>,
        F: FnOnce(&mut T),
    {
        let key = key.as_ref();
        let mut value = self.read(key, default)?;
        f(&mut value);
        self.write(key, &value)?;
        Ok(value)
    }

    /// Prepend `item` to the list under `key` and keep at most `cap`
    /// entries, dropping the oldest. Re-reads and rewrites the whole
    /// list, so each call is O(n) in the list length.
    pub fn append_capped<T, K>(&self, key: K, item: T, cap: usize) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let mut items: Vec<T> = self.read(key, Vec::new())?;
        items.insert(0, item);
        items.truncate(cap);
        self.write(key, &items)?;
        Ok(items)
    }

    /// Remove the element with `id` from the list under `key`.
    /// Returns whether anything was removed; a missing id writes nothing.
    pub fn remove_by_id<T, K>(&self, key: K, id: &str) -> Result<bool>
    where
        T: Identified + Serialize + DeserializeOwned,
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let mut items: Vec<T> = self.read(key, Vec::new())?;
        let before = items.len();
        items.retain(|item| item.id() != id);

        if items.len() == before {
            return Ok(false);
        }

        self.write(key, &items)?;
        Ok(true)
    }

    /// Replace the element with `id` in place, keeping its position.
    pub fn update_by_id<T, K>(&self, key: K, id: &str, value: T) -> Result<bool>
    where
        T: Identified + Serialize + DeserializeOwned,
        K: AsRef<str>,
    {
        let key = key.as_ref();
        let mut items: Vec<T> = self.read(key, Vec::new())?;

        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(false);
        };
        *slot = value;

        self.write(key, &items)?;
        Ok(true)
    }

    pub fn remove<K: AsRef<str>>(&self, key: K) -> Result<()> {
        if let Some(backend) = &self.backend {
            backend.remove_item(&self.namespaced_key(key.as_ref()))?;
        }
        Ok(())
    }

    /// Raw, un-namespaced access for installation-wide values.
    pub fn read_global(&self, key: &str) -> Result<Option<String>> {
        match &self.backend {
            Some(backend) => Ok(backend.get_item(key)?),
            None => Ok(None),
        }
    }

    pub fn write_global(&self, key: &str, value: &str) -> Result<()> {
        if let Some(backend) = &self.backend {
            backend.set_item(key, value)?;
        }
        Ok(())
    }

    pub fn remove_global(&self, key: &str) -> Result<()> {
        if let Some(backend) = &self.backend {
            backend.remove_item(key)?;
        }
        Ok(())
    }

    /// Delete the bare pre-namespacing keys. Returns how many existed.
    pub fn clear_legacy_keys(&self) -> Result<usize> {
        let Some(backend) = &self.backend else {
            return Ok(0);
        };

        let mut removed = 0;
        for key in LEGACY_KEYS {
            if backend.contains_key(key)? {
                backend.remove_item(key)?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(removed, "Cleared legacy records");
        }

        Ok(removed)
    }
}

impl Clone for RecordStore {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            identity: self.identity.clone(),
        }
    }
}
