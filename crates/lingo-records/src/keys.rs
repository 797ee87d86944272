//! Logical record keys and retention caps

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKey {
    UserProgress,
    SentenceHistory,
    ConversationHistory,
    AiCoachHistory,
    UserLevel,
    Vocabulary,
    TestResults,
    DiaryEntries,
    WrongAnswers,
    SubjectStatistics,
}

impl RecordKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKey::UserProgress => "userProgress",
            RecordKey::SentenceHistory => "sentenceHistory",
            RecordKey::ConversationHistory => "conversationHistory",
            RecordKey::AiCoachHistory => "aiCoachHistory",
            RecordKey::UserLevel => "userLevel",
            RecordKey::Vocabulary => "vocabulary",
            RecordKey::TestResults => "testResults",
            RecordKey::DiaryEntries => "diaryEntries",
            RecordKey::WrongAnswers => "wrongAnswers",
            RecordKey::SubjectStatistics => "subjectStatistics",
        }
    }

    /// Retention cap for capped logs; `None` for singletons and unbounded lists.
    pub fn cap(&self) -> Option<usize> {
        match self {
            RecordKey::SentenceHistory => Some(100),
            RecordKey::ConversationHistory => Some(50),
            RecordKey::AiCoachHistory => Some(50),
            RecordKey::TestResults => Some(50),
            _ => None,
        }
    }
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bare keys written before records were namespaced per user.
pub const LEGACY_KEYS: &[&str] = &[
    "userProgress",
    "sentenceHistory",
    "conversationHistory",
    "aiCoachHistory",
    "userLevel",
    "vocabulary",
    "testResults",
    "diaryEntries",
    "wrongAnswers",
    "myPageStatistics",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps() {
        assert_eq!(RecordKey::SentenceHistory.cap(), Some(100));
        assert_eq!(RecordKey::ConversationHistory.cap(), Some(50));
        assert_eq!(RecordKey::AiCoachHistory.cap(), Some(50));
        assert_eq!(RecordKey::TestResults.cap(), Some(50));
        assert_eq!(RecordKey::DiaryEntries.cap(), None);
        assert_eq!(RecordKey::UserLevel.cap(), None);
    }

    #[test]
    fn test_legacy_keys_are_never_namespaced_identity() {
        assert!(!LEGACY_KEYS.contains(&crate::UserIdentity::STORAGE_KEY));
    }
}
