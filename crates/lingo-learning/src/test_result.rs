//! Vocabulary test results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::level::CefrLevel;
use crate::Result;

const TEST_RESULT_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Words from the recommended table for the learner's level
    Recommended,
    /// Words from the learner's own vocabulary book
    MyWords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub word: String,
    pub meaning: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<CefrLevel>,
    pub score: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub words: Vec<WordOutcome>,
}

impl TestResult {
    /// Correct answers as a rounded percentage; 0 for an empty test.
    pub fn accuracy(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }
}

impl Identified for TestResult {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestResult {
    pub kind: TestKind,
    pub level: Option<CefrLevel>,
    pub score: u32,
    pub total: u32,
    pub words: Vec<WordOutcome>,
}

impl NewTestResult {
    /// Score and total derived from per-word outcomes.
    pub fn from_outcomes(kind: TestKind, level: Option<CefrLevel>, words: Vec<WordOutcome>) -> Self {
        let score = words.iter().filter(|w| w.correct).count() as u32;
        let total = words.len() as u32;
        Self {
            kind,
            level,
            score,
            total,
            words,
        }
    }
}

pub struct TestResultLog {
    store: RecordStore,
}

impl TestResultLog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<TestResult>> {
        Ok(self.store.read_or_default(RecordKey::TestResults)?)
    }

    pub fn save(&self, result: NewTestResult) -> Result<TestResult> {
        let result = TestResult {
            id: Uuid::new_v4().to_string(),
            kind: result.kind,
            level: result.level,
            score: result.score,
            total: result.total,
            date: Utc::now(),
            words: result.words,
        };

        let cap = RecordKey::TestResults.cap().unwrap_or(TEST_RESULT_CAP);
        self.store
            .append_capped(RecordKey::TestResults, result.clone(), cap)?;

        tracing::info!(
            kind = ?result.kind,
            score = result.score,
            total = result.total,
            "Saved test result"
        );

        Ok(result)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<TestResult, _>(RecordKey::TestResults, id)?)
    }
}

impl Clone for TestResultLog {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
