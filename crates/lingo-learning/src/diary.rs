//! Study diary (calendar annotations)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::area::StudyArea;
use crate::error::LearningError;
use crate::Result;

/// Perceived difficulty, stored with the learner-facing labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    #[serde(rename = "하")]
    Low,
    #[serde(rename = "중")]
    Medium,
    #[serde(rename = "상")]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub area: StudyArea,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub notes: String,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, area: StudyArea, difficulty: Difficulty, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            area,
            difficulty,
            notes: notes.into(),
        }
    }
}

impl Identified for DiaryEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Weeks of `year-month`, Sunday first. Cells outside the month are
/// `None`; the last week is padded to seven cells. Empty for an
/// invalid month.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<u32>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days_in_month = match next_month {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    };

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = first.weekday().num_days_from_sunday() as usize;

    for day in 1..=days_in_month {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }

    if column > 0 {
        weeks.push(week);
    }

    weeks
}

pub struct Diary {
    store: RecordStore,
}

impl Diary {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Result<Vec<DiaryEntry>> {
        Ok(self.store.read_or_default(RecordKey::DiaryEntries)?)
    }

    pub fn add(&self, entry: DiaryEntry) -> Result<DiaryEntry> {
        self.store
            .update(RecordKey::DiaryEntries, Vec::new(), |entries: &mut Vec<DiaryEntry>| {
                entries.push(entry.clone())
            })?;

        tracing::debug!(date = %entry.date, area = %entry.area, "Added diary entry");
        Ok(entry)
    }

    /// Replace the entry with `id`; the stored id is kept.
    pub fn update(&self, id: &str, mut entry: DiaryEntry) -> Result<DiaryEntry> {
        entry.id = id.to_string();

        if !self
            .store
            .update_by_id(RecordKey::DiaryEntries, id, entry.clone())?
        {
            return Err(LearningError::NotFound(id.to_string()));
        }

        Ok(entry)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<DiaryEntry, _>(RecordKey::DiaryEntries, id)?)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        Ok(self.entries()?.into_iter().find(|e| e.date == date))
    }

    pub fn entries_in_month(&self, year: i32, month: u32) -> Result<Vec<DiaryEntry>> {
        let mut entries: Vec<DiaryEntry> = self
            .entries()?
            .into_iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }
}

impl Clone for Diary {
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
    fn test_month_grid_january_2024() {
        // 2024-01-01 is a Monday
        let grid = month_grid(2024, 1);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0][0], None);
        assert_eq!(grid[0][1], Some(1));
        assert_eq!(grid[4][3], Some(31));
        assert_eq!(grid[4][4], None);
    }

    #[test]
    fn test_month_grid_edges() {
        // February 2026 starts on a Sunday and fills exactly four weeks
        let grid = month_grid(2026, 2);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0][0], Some(1));
        assert_eq!(grid[3][6], Some(28));

        assert_eq!(month_grid(2024, 12).last().unwrap().iter().flatten().max(), Some(&31));
        assert!(month_grid(2024, 13).is_empty());
    }

    #[test]
    fn test_diary_crud() {
        let diary = Diary::new(memory_store());

        let entry = diary
            .add(DiaryEntry::new(
                date("2024-01-15"),
                StudyArea::Speaking,
                Difficulty::Medium,
                "r/l 발음 연습",
            ))
            .unwrap();

        let found = diary.entry_for_date(date("2024-01-15")).unwrap().unwrap();
        assert_eq!(found, entry);

        let edited = diary
            .update(
                &entry.id,
                DiaryEntry::new(date("2024-01-15"), StudyArea::Reading, Difficulty::High, "토익 지문"),
            )
            .unwrap();
        assert_eq!(edited.id, entry.id);
        assert_eq!(diary.entries().unwrap(), vec![edited]);

        assert!(matches!(
            diary.update("missing", entry.clone()),
            Err(LearningError::NotFound(_))
        ));

        assert!(diary.delete(&entry.id).unwrap());
        assert!(diary.entries().unwrap().is_empty());
    }

    #[test]
    fn test_entries_in_month_sorted() {
        let diary = Diary::new(memory_store());
        for d in ["2024-02-10", "2024-01-20", "2024-01-05"] {
            diary
                .add(DiaryEntry::new(date(d), StudyArea::Writing, Difficulty::Low, ""))
                .unwrap();
        }

        let january = diary.entries_in_month(2024, 1).unwrap();
        let dates: Vec<NaiveDate> = january.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date("2024-01-05"), date("2024-01-20")]);
    }

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(serde_json::to_string(&Difficulty::High).unwrap(), "\"상\"");
        let entry: DiaryEntry = serde_json::from_str(
            r#"{"id":"1","date":"2024-01-16","type":"reading","difficulty":"중","notes":"어휘"}"#,
        )
        .unwrap();
        assert_eq!(entry.difficulty, Difficulty::Medium);
        assert_eq!(entry.area, StudyArea::Reading);
    }
}
