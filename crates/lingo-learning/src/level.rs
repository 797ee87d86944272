//! CEFR level and level-test outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lingo_records::{RecordKey, RecordStore};

use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    #[default]
    #[serde(rename = "Not Set")]
    NotSet,
}

impl CefrLevel {
    pub fn all() -> [CefrLevel; 6] {
        [
            CefrLevel::A1,
            CefrLevel::A2,
            CefrLevel::B1,
            CefrLevel::B2,
            CefrLevel::C1,
            CefrLevel::C2,
        ]
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, CefrLevel::NotSet)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
            CefrLevel::NotSet => "Not Set",
        }
    }
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CefrLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A1" => Ok(CefrLevel::A1),
            "A2" => Ok(CefrLevel::A2),
            "B1" => Ok(CefrLevel::B1),
            "B2" => Ok(CefrLevel::B2),
            "C1" => Ok(CefrLevel::C1),
            "C2" => Ok(CefrLevel::C2),
            "NOT SET" | "" => Ok(CefrLevel::NotSet),
            _ => Err(format!("Unknown CEFR level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLevel {
    #[serde(default)]
    pub level: CefrLevel,
    #[serde(default, with = "crate::serde_blank")]
    pub test_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

/// Singleton per user, overwritten by every completed level test.
pub struct LevelStore {
    store: RecordStore,
}

impl LevelStore {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<UserLevel> {
        Ok(self.store.read_or_default(RecordKey::UserLevel)?)
    }

    pub fn save(&self, level: &UserLevel) -> Result<()> {
        self.store.write(RecordKey::UserLevel, level)?;

        tracing::info!(level = %level.level, score = level.score, "Saved user level");
        Ok(())
    }

    pub fn record_test(
        &self,
        level: CefrLevel,
        score: u32,
        weaknesses: Vec<String>,
        strengths: Vec<String>,
    ) -> Result<UserLevel> {
        let result = UserLevel {
            level,
            test_date: Some(Utc::now()),
            score,
            weaknesses,
            strengths,
        };
        self.save(&result)?;
        Ok(result)
    }
}

impl Clone for LevelStore {
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
    fn test_level_serde_names() {
        assert_eq!(serde_json::to_string(&CefrLevel::NotSet).unwrap(), "\"Not Set\"");
        assert_eq!(serde_json::to_string(&CefrLevel::B2).unwrap(), "\"B2\"");
        assert_eq!("c1".parse::<CefrLevel>(), Ok(CefrLevel::C1));
        assert!("D1".parse::<CefrLevel>().is_err());
    }

    #[test]
    fn test_default_level_is_not_set() {
        let levels = LevelStore::new(memory_store());
        let level = levels.get().unwrap();
        assert_eq!(level.level, CefrLevel::NotSet);
        assert_eq!(level.test_date, None);
        assert!(!level.level.is_set());
    }

    #[test]
    fn test_record_test_overwrites() {
        let levels = LevelStore::new(memory_store());
        levels
            .record_test(CefrLevel::A2, 40, vec!["시제".into()], vec![])
            .unwrap();
        levels
            .record_test(CefrLevel::B1, 65, vec![], vec!["어휘".into()])
            .unwrap();

        let level = levels.get().unwrap();
        assert_eq!(level.level, CefrLevel::B1);
        assert_eq!(level.score, 65);
        assert!(level.weaknesses.is_empty());
        assert!(level.test_date.is_some());
    }

    #[test]
    fn test_legacy_level_record() {
        let level: UserLevel = serde_json::from_str(
            r#"{"level":"Not Set","testDate":"","score":0,"weaknesses":[],"strengths":[]}"#,
        )
        .unwrap();
        assert_eq!(level, UserLevel::default());
    }
}
