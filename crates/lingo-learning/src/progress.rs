//! Points and daily study streak

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use lingo_records::{RecordKey, RecordStore};

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub total_points: u64,
    #[serde(default)]
    pub streak: u32,
    #[serde(default, with = "crate::serde_blank")]
    pub last_study_date: Option<NaiveDate>,
    #[serde(default)]
    pub study_dates: BTreeSet<NaiveDate>,
}

/// Apply one study event on `today` to the streak.
///
/// Only the first event of a calendar day changes anything: the day is
/// recorded, the streak grows if the previous study day was yesterday and
/// restarts at 1 otherwise.
pub fn update_streak(progress: &UserProgress, today: NaiveDate) -> UserProgress {
    let mut next = progress.clone();

    if next.study_dates.contains(&today) {
        return next;
    }

    next.study_dates.insert(today);

    let yesterday = today.pred_opt();
    if next.last_study_date.is_some() && next.last_study_date == yesterday {
        next.streak += 1;
    } else if next.last_study_date != Some(today) {
        next.streak = 1;
    }
    next.last_study_date = Some(today);

    next
}

pub struct ProgressTracker {
    store: RecordStore,
}

impl ProgressTracker {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<UserProgress> {
        Ok(self.store.read_or_default(RecordKey::UserProgress)?)
    }

    pub fn save(&self, progress: &UserProgress) -> Result<()> {
        Ok(self.store.write(RecordKey::UserProgress, progress)?)
    }

    /// Award points for a finished activity and count today as a study day.
    pub fn record_study(&self, points: u64) -> Result<UserProgress> {
        self.record_study_on(points, Utc::now().date_naive())
    }

    pub fn record_study_on(&self, points: u64, today: NaiveDate) -> Result<UserProgress> {
        let progress = self
            .store
            .update(RecordKey::UserProgress, UserProgress::default(), |p: &mut UserProgress| {
                p.total_points += points;
                *p = update_streak(p, today);
            })?;

        tracing::debug!(
            total_points = progress.total_points,
            streak = progress.streak,
            "Recorded study"
        );

        Ok(progress)
    }
}

impl Clone for ProgressTracker {
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

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_streak_scenario() {
        let start = UserProgress::default();

        let day1 = update_streak(&start, date("2024-01-15"));
        assert_eq!(day1.streak, 1);
        assert_eq!(day1.last_study_date, Some(date("2024-01-15")));
        assert_eq!(day1.study_dates.iter().copied().collect::<Vec<_>>(), vec![date("2024-01-15")]);

        let day2 = update_streak(&day1, date("2024-01-16"));
        assert_eq!(day2.streak, 2);

        let gap = update_streak(&day2, date("2024-01-20"));
        assert_eq!(gap.streak, 1);
        assert_eq!(gap.study_dates.len(), 3);
    }

    #[test]
    fn test_same_day_is_unchanged() {
        let day1 = update_streak(&UserProgress::default(), date("2024-01-15"));
        let again = update_streak(&day1, date("2024-01-15"));
        assert_eq!(again, day1);
    }

    #[test]
    fn test_gap_of_two_days_resets() {
        let mut progress = UserProgress {
            streak: 5,
            last_study_date: Some(date("2024-03-01")),
            ..Default::default()
        };
        progress.study_dates.insert(date("2024-03-01"));

        let next = update_streak(&progress, date("2024-03-03"));
        assert_eq!(next.streak, 1);
    }

    #[test]
    fn test_legacy_blank_last_study_date() {
        let progress: UserProgress = serde_json::from_str(
            r#"{"totalPoints":0,"streak":0,"lastStudyDate":"","studyDates":[]}"#,
        )
        .unwrap();
        assert_eq!(progress.last_study_date, None);

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains(r#""lastStudyDate":"""#));
    }

    #[test]
    fn test_tracker_persists_points_and_streak() {
        let tracker = ProgressTracker::new(memory_store());

        tracker.record_study_on(10, date("2024-01-15")).unwrap();
        tracker.record_study_on(5, date("2024-01-15")).unwrap();
        let progress = tracker.record_study_on(0, date("2024-01-16")).unwrap();

        assert_eq!(progress.total_points, 15);
        assert_eq!(progress.streak, 2);
        assert_eq!(tracker.get().unwrap(), progress);
    }
}
