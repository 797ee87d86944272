//! Per-installation user identity
//!
//! The identity is the only record stored without a namespace. It is
//! generated once, lazily, and never rewritten except by an explicit
//! nickname login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_storage::KeyValueStore;

use crate::Result;

const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserIdentity {
    user_id: String,
}

impl UserIdentity {
    /// Un-namespaced storage key holding the identity
    pub const STORAGE_KEY: &'static str = "userId";

    /// `user_<unixMillis>_<9 base36 chars>`
    pub fn generate() -> Self {
        Self::generate_at(Utc::now())
    }

    pub fn generate_at(now: DateTime<Utc>) -> Self {
        Self {
            user_id: format!("user_{}_{}", now.timestamp_millis(), random_base36()),
        }
    }

    /// `user_<nickname, lowercased, whitespace runs as '_'>_<unixMillis>`
    pub fn for_nickname(nickname: &str, now: DateTime<Utc>) -> Self {
        let slug = nickname
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        Self {
            user_id: format!("user_{}_{}", slug, now.timestamp_millis()),
        }
    }

    pub fn from_existing(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.user_id
    }

    /// Read the persisted identity, if any. Blank values count as absent.
    pub fn load(backend: &dyn KeyValueStore) -> Result<Option<Self>> {
        let stored = backend.get_item(Self::STORAGE_KEY)?;
        Ok(stored
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Self::from_existing))
    }

    /// Return the persisted identity, generating and persisting one on
    /// first use. Repeated calls against the same backend agree.
    pub fn load_or_create(backend: &dyn KeyValueStore) -> Result<Self> {
        if let Some(identity) = Self::load(backend)? {
            return Ok(identity);
        }

        let identity = Self::generate();
        identity.persist(backend)?;

        tracing::info!(user_id = %identity, "Created user identity");

        Ok(identity)
    }

    pub fn persist(&self, backend: &dyn KeyValueStore) -> Result<()> {
        backend.set_item(Self::STORAGE_KEY, &self.user_id)?;
        Ok(())
    }
}

impl std::fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.user_id)
    }
}

fn random_base36() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(RANDOM_SUFFIX_LEN);
    for _ in 0..RANDOM_SUFFIX_LEN {
        out.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lingo_storage::MemoryStore;

    #[test]
    fn test_generated_format() {
        let now = Utc.timestamp_millis_opt(1_705_276_800_000).unwrap();
        let identity = UserIdentity::generate_at(now);

        let parts: Vec<&str> = identity.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "user");
        assert_eq!(parts[1], "1705276800000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_load_or_create_is_idempotent() {
        let backend = MemoryStore::new();

        let first = UserIdentity::load_or_create(&backend).unwrap();
        let second = UserIdentity::load_or_create(&backend).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            backend.get_item(UserIdentity::STORAGE_KEY).unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn test_blank_stored_identity_is_replaced() {
        let backend = MemoryStore::new();
        backend.set_item(UserIdentity::STORAGE_KEY, "  ").unwrap();

        let identity = UserIdentity::load_or_create(&backend).unwrap();
        assert!(identity.as_str().starts_with("user_"));
    }

    #[test]
    fn test_nickname_identity() {
        let now = Utc.timestamp_millis_opt(42).unwrap();
        let identity = UserIdentity::for_nickname("  Kim  Min Su ", now);
        assert_eq!(identity.as_str(), "user_kim_min_su_42");
    }
}
