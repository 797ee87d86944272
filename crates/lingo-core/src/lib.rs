//! Lingo Core
//!
//! Entry point for hosts: configuration, logging and the `Learner`
//! facade that binds a storage backend to the active user.

mod config;
mod error;
mod learner;

pub use config::{Config, StorageBackend};
pub use error::CoreError;
pub use learner::{Learner, NICKNAME_KEY};

// Re-export record types so hosts depend on a single crate
pub use lingo_learning::{
    analyze_weaknesses, due_for_review, month_grid, recommended_words, update_streak,
    AreaStatistics, CefrLevel, CoachExchange, CoachLog, ConversationLog, ConversationMessage,
    ConversationSession, CorrectionLog, Diary, DiaryEntry, Difficulty, ErrorTypeSummary,
    LearningError, LevelStore, NewTestResult, NewVocabulary, ProgressTracker, RecommendedWord,
    Role, SentenceCorrection, StatisticsStore, StudyArea, SubjectStatistics, TestKind,
    TestResult, TestResultLog, UserLevel, UserProgress, VocabularyBook, VocabularyItem,
    WeaknessReport, WrongAnswer, WrongAnswerNote,
};
pub use lingo_records::{RecordError, RecordKey, RecordStore, UserIdentity};
pub use lingo_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
