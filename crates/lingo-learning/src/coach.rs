//! AI coach question/answer log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::error::LearningError;
use crate::Result;

const COACH_CAP: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachExchange {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

impl Identified for CoachExchange {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct CoachLog {
    store: RecordStore,
}

impl CoachLog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<CoachExchange>> {
        Ok(self.store.read_or_default(RecordKey::AiCoachHistory)?)
    }

    /// Record an answered question; id and timestamp are assigned here.
    pub fn add(&self, question: &str, answer: &str) -> Result<CoachExchange> {
        if question.trim().is_empty() {
            return Err(LearningError::EmptyField("question"));
        }

        let exchange = CoachExchange {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
        };

        let cap = RecordKey::AiCoachHistory.cap().unwrap_or(COACH_CAP);
        self.store
            .append_capped(RecordKey::AiCoachHistory, exchange.clone(), cap)?;

        Ok(exchange)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<CoachExchange, _>(RecordKey::AiCoachHistory, id)?)
    }
}

impl Clone for CoachLog {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_store;

    #[test]
    fn test_coach_log() {
        let log = CoachLog::new(memory_store());

        let first = log.add("What is the present perfect?", "have + p.p.").unwrap();
        let second = log.add("affect vs effect?", "verb vs noun").unwrap();
        assert_ne!(first.id, second.id);

        let history = log.list().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], second);

        assert!(matches!(log.add("   ", "x"), Err(LearningError::EmptyField(_))));
    }

    #[test]
    fn test_coach_log_cap() {
        let log = CoachLog::new(memory_store());
        for n in 0..55 {
            log.add(&format!("q{n}"), "a").unwrap();
        }
        let history = log.list().unwrap();
        assert_eq!(history.len(), 50);
        assert_eq!(history[0].question, "q54");
    }
}
