//! Per-area practice statistics

use serde::{Deserialize, Serialize};

use lingo_records::{RecordKey, RecordStore};

use crate::area::StudyArea;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaStatistics {
    /// Sessions started
    #[serde(default)]
    pub total: u32,
    /// Sessions finished with a score
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub average_score: f64,
}

impl AreaStatistics {
    pub fn record_attempt(&mut self) {
        self.total += 1;
    }

    /// Fold one finished session's score into the running average.
    pub fn record_completion(&mut self, score: f64) {
        self.completed += 1;
        if self.total < self.completed {
            self.total = self.completed;
        }
        let n = self.completed as f64;
        self.average_score += (score - self.average_score) / n;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectStatistics {
    #[serde(default)]
    pub speaking: AreaStatistics,
    #[serde(default)]
    pub writing: AreaStatistics,
    #[serde(default)]
    pub reading: AreaStatistics,
}

impl SubjectStatistics {
    pub fn area(&self, area: StudyArea) -> &AreaStatistics {
        match area {
            StudyArea::Speaking => &self.speaking,
            StudyArea::Writing => &self.writing,
            StudyArea::Reading => &self.reading,
        }
    }

    pub fn area_mut(&mut self, area: StudyArea) -> &mut AreaStatistics {
        match area {
            StudyArea::Speaking => &mut self.speaking,
            StudyArea::Writing => &mut self.writing,
            StudyArea::Reading => &mut self.reading,
        }
    }
}

pub struct StatisticsStore {
    store: RecordStore,
}

impl StatisticsStore {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<SubjectStatistics> {
        Ok(self.store.read_or_default(RecordKey::SubjectStatistics)?)
    }

    pub fn record_attempt(&self, area: StudyArea) -> Result<SubjectStatistics> {
        Ok(self.store.update(
            RecordKey::SubjectStatistics,
            SubjectStatistics::default(),
            |stats: &mut SubjectStatistics| stats.area_mut(area).record_attempt(),
        )?)
    }

    pub fn record_session(&self, area: StudyArea, score: f64) -> Result<SubjectStatistics> {
        let stats = self.store.update(
            RecordKey::SubjectStatistics,
            SubjectStatistics::default(),
            |stats: &mut SubjectStatistics| stats.area_mut(area).record_completion(score),
        )?;

        tracing::debug!(
            area = %area,
            completed = stats.area(area).completed,
            average = stats.area(area).average_score,
            "Recorded practice session"
        );

        Ok(stats)
    }
}

impl Clone for StatisticsStore {
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
    fn test_running_average() {
        let mut stats = AreaStatistics::default();
        stats.record_completion(80.0);
        stats.record_completion(60.0);
        stats.record_completion(100.0);

        assert_eq!(stats.completed, 3);
        assert_eq!(stats.total, 3);
        assert!((stats.average_score - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_attempts_and_completions_persist() {
        let statistics = StatisticsStore::new(memory_store());

        statistics.record_attempt(StudyArea::Writing).unwrap();
        statistics.record_attempt(StudyArea::Writing).unwrap();
        let stats = statistics.record_session(StudyArea::Writing, 70.0).unwrap();

        assert_eq!(stats.writing.total, 2);
        assert_eq!(stats.writing.completed, 1);
        assert_eq!(stats.speaking, AreaStatistics::default());
        assert_eq!(statistics.get().unwrap(), stats);
    }

    #[test]
    fn test_shape() {
        let json = serde_json::to_value(SubjectStatistics::default()).unwrap();
        assert_eq!(json["reading"]["averageScore"], 0.0);
    }
}
