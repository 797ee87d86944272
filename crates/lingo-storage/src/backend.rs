//! Backend contract shared by every storage implementation.

use crate::Result;

/// A string-keyed, string-valued store with whole-value replacement.
///
/// Mirrors the `getItem` / `setItem` / `removeItem` surface of browser
/// local storage. Implementations must be shareable across threads even
/// though callers only ever have one logical writer.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>>;

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}
