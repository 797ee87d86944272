//! Lingo Learning Records
//!
//! Typed learner records and the operations pages perform on them:
//! - progress and daily streaks
//! - vocabulary with spaced review
//! - sentence corrections, conversations and coach exchanges (capped logs)
//! - level test results, vocabulary test results
//! - study diary, wrong-answer notes and derived weakness reports
//!
//! Every manager persists through a `lingo_records::RecordStore`.

mod area;
mod coach;
mod conversation;
mod correction;
mod diary;
mod error;
mod level;
mod progress;
mod serde_blank;
mod statistics;
mod test_result;
mod vocabulary;
mod words;
mod wrong_answer;

pub use area::StudyArea;
pub use coach::{CoachExchange, CoachLog};
pub use conversation::{ConversationLog, ConversationMessage, ConversationSession, Evaluation, Role};
pub use correction::{
    error_type_histogram, summarize_error_types, CorrectionLog, ErrorTypeSummary,
    SentenceCorrection, NO_ERROR_MARKER,
};
pub use diary::{month_grid, Diary, DiaryEntry, Difficulty};
pub use error::LearningError;
pub use level::{CefrLevel, LevelStore, UserLevel};
pub use progress::{update_streak, ProgressTracker, UserProgress};
pub use statistics::{AreaStatistics, StatisticsStore, SubjectStatistics};
pub use test_result::{NewTestResult, TestKind, TestResult, TestResultLog, WordOutcome};
pub use vocabulary::{
    due_for_review, NewVocabulary, VocabularyBook, VocabularyItem, MASTERY_REVIEWS,
    REVIEW_SCHEDULE,
};
pub use words::{recommended_words, RecommendedWord};
pub use wrong_answer::{
    analyze_weaknesses, AnswerExample, AreaWeakness, GrammarWeakness, VocabularyWeakness,
    Weakness, WeaknessReport, WordDifficulty, WrongAnswer, WrongAnswerNote,
};

pub type Result<T> = std::result::Result<T, LearningError>;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use lingo_records::{RecordStore, UserIdentity};
    use lingo_storage::MemoryStore;

    pub fn memory_store() -> RecordStore {
        RecordStore::new(
            Arc::new(MemoryStore::new()),
            UserIdentity::from_existing("user_1700000000000_testuser0"),
        )
    }
}
