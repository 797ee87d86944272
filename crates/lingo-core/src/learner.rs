//! Learner state container
//!
//! Owns the storage backend and the active user's record store, and hands
//! out the per-entity managers bound to that store.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use lingo_learning::{
    CoachLog, ConversationLog, CorrectionLog, Diary, LevelStore, ProgressTracker,
    StatisticsStore, TestResultLog, VocabularyBook, WrongAnswerNote,
};
use lingo_records::{KeyValueStore, RecordStore, UserIdentity};
use lingo_storage::{Database, MemoryStore};

use crate::config::{Config, StorageBackend};
use crate::error::CoreError;
use crate::Result;

/// Installation-wide key holding the logged-in nickname
pub const NICKNAME_KEY: &str = "userNickname";

pub struct Learner {
    config: Config,
    /// Replaced wholesale on login; managers snapshot it when handed out
    store: Arc<RwLock<RecordStore>>,
}

impl Learner {
    pub fn new(config: Config) -> Result<Self> {
        let store = match config.backend {
            StorageBackend::Sqlite => {
                let db = Database::open(&config.database_path)?;
                RecordStore::open(Arc::new(db))?
            }
            StorageBackend::Memory => RecordStore::open(Arc::new(MemoryStore::new()))?,
            StorageBackend::Detached => RecordStore::detached(UserIdentity::generate()),
        };

        Ok(Self::from_parts(config, store))
    }

    /// Wrap an existing store, e.g. one over a quota-limited backend.
    pub fn with_store(store: RecordStore) -> Self {
        let config = Config {
            backend: if store.is_detached() {
                StorageBackend::Detached
            } else {
                StorageBackend::Memory
            },
            ..Config::default()
        };
        Self::from_parts(config, store)
    }

    fn from_parts(config: Config, store: RecordStore) -> Self {
        Self {
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }

    pub fn initialize(&self) -> Result<()> {
        let store = self.store.read();

        if store.is_detached() {
            tracing::warn!(user_id = %store.identity(), "No storage available, records will not persist");
        } else {
            tracing::info!(
                user_id = %store.identity(),
                backend = ?self.config.backend,
                "Learner initialized"
            );
        }

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn user_id(&self) -> String {
        self.store.read().user_id().to_string()
    }

    /// Snapshot of the active record store.
    pub fn store(&self) -> RecordStore {
        self.store.read().clone()
    }

    // ==================== Managers ====================

    pub fn progress(&self) -> ProgressTracker {
        ProgressTracker::new(self.store())
    }

    pub fn vocabulary(&self) -> VocabularyBook {
        VocabularyBook::new(self.store())
    }

    pub fn corrections(&self) -> CorrectionLog {
        CorrectionLog::new(self.store())
    }

    pub fn conversations(&self) -> ConversationLog {
        ConversationLog::new(self.store())
    }

    pub fn coach(&self) -> CoachLog {
        CoachLog::new(self.store())
    }

    pub fn level(&self) -> LevelStore {
        LevelStore::new(self.store())
    }

    pub fn test_results(&self) -> TestResultLog {
        TestResultLog::new(self.store())
    }

    pub fn diary(&self) -> Diary {
        Diary::new(self.store())
    }

    pub fn wrong_answers(&self) -> WrongAnswerNote {
        WrongAnswerNote::new(self.store())
    }

    pub fn statistics(&self) -> StatisticsStore {
        StatisticsStore::new(self.store())
    }

    /// Remove records written before keys were namespaced per user.
    pub fn clear_legacy_data(&self) -> Result<usize> {
        Ok(self.store.read().clear_legacy_keys()?)
    }

    // ==================== Account ====================

    pub fn nickname(&self) -> Result<Option<String>> {
        let stored = self.store.read().read_global(NICKNAME_KEY)?;
        Ok(stored.filter(|n| !n.trim().is_empty()))
    }

    /// Log in under `nickname`, switching to a fresh identity derived from it.
    ///
    /// Managers obtained before the call stay bound to the previous user.
    pub fn login(&self, nickname: &str) -> Result<String> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(CoreError::EmptyNickname);
        }

        let mut store = self.store.write();
        let identity = UserIdentity::for_nickname(nickname, Utc::now());

        // Persisted userId and in-memory store must agree even if the nickname write fails
        if let Some(backend) = store.backend() {
            identity.persist(backend.as_ref() as &dyn KeyValueStore)?;
        }
        let rebound = store.with_identity(identity);
        *store = rebound;

        store.write_global(NICKNAME_KEY, nickname)?;

        tracing::info!(user_id = %store.identity(), "Logged in");

        Ok(store.user_id().to_string())
    }

    /// Forget the nickname. The user id and its records stay.
    pub fn logout(&self) -> Result<()> {
        let store = self.store.read();
        store.remove_global(NICKNAME_KEY)?;

        tracing::info!(user_id = %store.identity(), "Logged out");
        Ok(())
    }
}

impl Clone for Learner {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lingo_learning::{NewVocabulary, StudyArea};

    fn memory_learner() -> Learner {
        let learner = Learner::new(Config::in_memory()).unwrap();
        learner.initialize().unwrap();
        learner
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_identity_is_stable() {
        let learner = memory_learner();
        let id = learner.user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(learner.user_id(), id);
        assert_eq!(learner.store().namespaced_key("userProgress"), format!("{id}_userProgress"));
    }

    #[test]
    fn test_managers_share_the_store() {
        let learner = memory_learner();

        learner.progress().record_study_on(10, date("2024-01-15")).unwrap();
        learner.statistics().record_session(StudyArea::Reading, 90.0).unwrap();

        assert_eq!(learner.progress().get().unwrap().total_points, 10);
        assert_eq!(learner.statistics().get().unwrap().reading.completed, 1);
    }

    #[test]
    fn test_login_switches_namespace() {
        let learner = memory_learner();
        learner
            .vocabulary()
            .add(NewVocabulary {
                word: "achieve".into(),
                meaning: "달성하다".into(),
                example: String::new(),
                source: "manual".into(),
            })
            .unwrap();

        let before = learner.user_id();
        let after = learner.login("  Kim Minji ").unwrap();

        assert_ne!(before, after);
        assert!(after.starts_with("user_kim_minji_"));
        assert_eq!(learner.user_id(), after);
        assert_eq!(learner.nickname().unwrap().as_deref(), Some("Kim Minji"));
        assert!(learner.vocabulary().list().unwrap().is_empty());

        let persisted = learner.store().read_global(UserIdentity::STORAGE_KEY).unwrap();
        assert_eq!(persisted.as_deref(), Some(after.as_str()));
    }

    #[test]
    fn test_logout_keeps_user_id() {
        let learner = memory_learner();
        let id = learner.login("minji").unwrap();

        learner.logout().unwrap();
        assert_eq!(learner.nickname().unwrap(), None);
        assert_eq!(learner.user_id(), id);
    }

    #[test]
    fn test_empty_nickname_rejected() {
        let learner = memory_learner();
        let id = learner.user_id();

        assert!(matches!(learner.login("   "), Err(CoreError::EmptyNickname)));
        assert_eq!(learner.user_id(), id);
        assert_eq!(learner.nickname().unwrap(), None);
    }

    #[test]
    fn test_login_keeps_persisted_identity_in_step() {
        // Room for the generated id and the longer nickname id, not the nickname too
        let backend = Arc::new(MemoryStore::with_quota(80));
        let learner = Learner::with_store(RecordStore::open(backend.clone()).unwrap());
        let nickname = "abcdefghijklmnopqrstuvwxyz0123";

        let err = learner.login(nickname).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Record(lingo_records::RecordError::Storage(
                lingo_storage::StorageError::QuotaExceeded { .. }
            ))
        ));

        let persisted = backend.get_item(UserIdentity::STORAGE_KEY).unwrap();
        assert_eq!(persisted.as_deref(), Some(learner.user_id().as_str()));
        assert!(learner.user_id().starts_with(&format!("user_{nickname}_")));
        assert_eq!(learner.nickname().unwrap(), None);
    }

    #[test]
    fn test_login_rejected_by_quota_keeps_previous_identity() {
        let backend = Arc::new(MemoryStore::with_quota(40));
        let learner = Learner::with_store(RecordStore::open(backend.clone()).unwrap());
        let before = learner.user_id();

        assert!(learner.login("abcdefghijklmnopqrstuvwxyz0123").is_err());
        assert_eq!(learner.user_id(), before);
        assert_eq!(
            backend.get_item(UserIdentity::STORAGE_KEY).unwrap().as_deref(),
            Some(before.as_str())
        );
        assert_eq!(learner.nickname().unwrap(), None);
    }

    #[test]
    fn test_detached_learner_defaults() {
        let learner = Learner::new(Config::detached()).unwrap();
        learner.initialize().unwrap();

        learner.progress().record_study_on(10, date("2024-01-15")).unwrap();
        assert_eq!(learner.progress().get().unwrap().total_points, 0);
        assert_eq!(learner.clear_legacy_data().unwrap(), 0);

        learner.login("minji").unwrap();
        assert_eq!(learner.nickname().unwrap(), None);
    }

    #[test]
    fn test_legacy_data_cleared() {
        let backend = Arc::new(MemoryStore::new());
        backend.set_item("userProgress", r#"{"totalPoints":5}"#).unwrap();
        backend.set_item("wrongAnswers", "[]").unwrap();

        let learner = Learner::with_store(RecordStore::open(backend.clone()).unwrap());
        assert_eq!(learner.clear_legacy_data().unwrap(), 2);
        assert!(backend.get_item("userProgress").unwrap().is_none());
        assert_eq!(learner.progress().get().unwrap().total_points, 0);
    }

    #[test]
    fn test_sqlite_learner_reopens_with_same_identity() {
        let dir = std::env::temp_dir().join(format!("lingo-core-{}", std::process::id()));
        let config = Config::new(dir.clone());

        let id = {
            let learner = Learner::new(config.clone()).unwrap();
            learner.progress().record_study_on(7, date("2024-01-15")).unwrap();
            learner.user_id()
        };

        let learner = Learner::new(config).unwrap();
        assert_eq!(learner.user_id(), id);
        assert_eq!(learner.progress().get().unwrap().total_points, 7);

        drop(learner);
        let _ = std::fs::remove_dir_all(dir);
    }
}
