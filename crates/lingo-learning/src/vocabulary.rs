//! Vocabulary book with spaced review
//!
//! Due-for-review is derived on demand, never stored. After the n-th
//! review an item waits `REVIEW_SCHEDULE[n - 1]` days (the last interval
//! repeats); three reviews mark it mastered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::error::LearningError;
use crate::words::RecommendedWord;
use crate::Result;

/// Days to wait after the 1st, 2nd and later reviews
pub const REVIEW_SCHEDULE: [i64; 3] = [1, 3, 7];
pub const MASTERY_REVIEWS: usize = 3;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: String,
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub source: String,
    pub added_date: DateTime<Utc>,
    #[serde(default)]
    pub review_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub mastered: bool,
}

impl VocabularyItem {
    pub fn review_count(&self) -> usize {
        self.review_dates.len()
    }

    pub fn last_reviewed(&self) -> Option<DateTime<Utc>> {
        self.review_dates.last().copied()
    }

    /// Interval owed after the latest review, `None` before the first one.
    pub fn next_interval_days(&self) -> Option<i64> {
        let count = self.review_count();
        if count == 0 {
            return None;
        }
        Some(REVIEW_SCHEDULE[(count - 1).min(REVIEW_SCHEDULE.len() - 1)])
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        if self.mastered {
            return false;
        }

        match (self.last_reviewed(), self.next_interval_days()) {
            (Some(last), Some(interval)) => {
                // Whole days elapsed, floored
                let days = (now - last).num_seconds().div_euclid(SECONDS_PER_DAY);
                days >= interval
            }
            _ => true,
        }
    }

    fn record_review(&mut self, at: DateTime<Utc>) {
        self.review_dates.push(at);
        if self.review_dates.len() >= MASTERY_REVIEWS {
            self.mastered = true;
        }
    }
}

impl Identified for VocabularyItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Items to surface for review at `now`, in stored order.
pub fn due_for_review(items: &[VocabularyItem], now: DateTime<Utc>) -> Vec<VocabularyItem> {
    items.iter().filter(|item| item.is_due(now)).cloned().collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVocabulary {
    pub word: String,
    pub meaning: String,
    pub example: String,
    pub source: String,
}

impl From<&RecommendedWord> for NewVocabulary {
    fn from(word: &RecommendedWord) -> Self {
        Self {
            word: word.word.to_string(),
            meaning: word.meaning.to_string(),
            example: word.example.to_string(),
            source: "recommended".to_string(),
        }
    }
}

pub struct VocabularyBook {
    store: RecordStore,
}

impl VocabularyBook {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Newest first
    pub fn list(&self) -> Result<Vec<VocabularyItem>> {
        Ok(self.store.read_or_default(RecordKey::Vocabulary)?)
    }

    pub fn add(&self, item: NewVocabulary) -> Result<VocabularyItem> {
        self.add_at(item, Utc::now())
    }

    pub fn add_at(&self, item: NewVocabulary, now: DateTime<Utc>) -> Result<VocabularyItem> {
        if item.word.trim().is_empty() {
            return Err(LearningError::EmptyField("word"));
        }
        if item.meaning.trim().is_empty() {
            return Err(LearningError::EmptyField("meaning"));
        }

        let entry = VocabularyItem {
            id: Uuid::new_v4().to_string(),
            word: item.word.trim().to_string(),
            meaning: item.meaning.trim().to_string(),
            example: item.example,
            source: item.source,
            added_date: now,
            review_dates: Vec::new(),
            mastered: false,
        };

        self.store
            .update(RecordKey::Vocabulary, Vec::new(), |items: &mut Vec<VocabularyItem>| {
                items.insert(0, entry.clone())
            })?;

        tracing::debug!(word = %entry.word, source = %entry.source, "Added vocabulary");

        Ok(entry)
    }

    pub fn mark_reviewed(&self, id: &str) -> Result<VocabularyItem> {
        self.mark_reviewed_at(id, Utc::now())
    }

    pub fn mark_reviewed_at(&self, id: &str, at: DateTime<Utc>) -> Result<VocabularyItem> {
        let mut items = self.list()?;
        let item = items
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| LearningError::NotFound(id.to_string()))?;

        item.record_review(at);
        let reviewed = item.clone();

        self.store.write(RecordKey::Vocabulary, &items)?;

        if reviewed.mastered {
            tracing::info!(word = %reviewed.word, "Vocabulary mastered");
        }

        Ok(reviewed)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<VocabularyItem, _>(RecordKey::Vocabulary, id)?)
    }

    pub fn due(&self, now: DateTime<Utc>) -> Result<Vec<VocabularyItem>> {
        Ok(due_for_review(&self.list()?, now))
    }

    /// Recommended words whose spelling is not already in the book.
    pub fn unsaved<'a>(&self, words: &'a [RecommendedWord]) -> Result<Vec<&'a RecommendedWord>> {
        let items = self.list()?;
        Ok(words
            .iter()
            .filter(|w| !items.iter().any(|v| v.word.eq_ignore_ascii_case(w.word)))
            .collect())
    }
}

impl Clone for VocabularyBook {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
