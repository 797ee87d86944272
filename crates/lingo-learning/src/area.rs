//! Practice areas shared by the diary, statistics and wrong-answer notes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyArea {
    Speaking,
    Writing,
    Reading,
}

impl StudyArea {
    pub const ALL: [StudyArea; 3] = [StudyArea::Speaking, StudyArea::Writing, StudyArea::Reading];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyArea::Speaking => "speaking",
            StudyArea::Writing => "writing",
            StudyArea::Reading => "reading",
        }
    }
}

impl std::fmt::Display for StudyArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StudyArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speaking" => Ok(StudyArea::Speaking),
            "writing" => Ok(StudyArea::Writing),
            "reading" => Ok(StudyArea::Reading),
            _ => Err(format!("Unknown study area: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Reading".parse::<StudyArea>(), Ok(StudyArea::Reading));
        assert!("grammar".parse::<StudyArea>().is_err());
        assert_eq!(StudyArea::Writing.to_string(), "writing");
        assert_eq!(
            serde_json::to_string(&StudyArea::Speaking).unwrap(),
            "\"speaking\""
        );
    }
}
