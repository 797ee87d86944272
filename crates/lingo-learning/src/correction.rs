//! Sentence correction log and error-type analysis

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::Result;

/// Error type the corrector reports for a sentence with nothing to fix
pub const NO_ERROR_MARKER: &str = "오류 없음";

const CORRECTION_CAP: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceCorrection {
    pub id: String,
    pub original: String,
    pub corrected: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub error_type: String,
    pub timestamp: DateTime<Utc>,
}

impl SentenceCorrection {
    pub fn new(
        original: impl Into<String>,
        corrected: impl Into<String>,
        reason: impl Into<String>,
        error_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original: original.into(),
            corrected: corrected.into(),
            reason: reason.into(),
            error_type: error_type.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn has_error(&self) -> bool {
        let error_type = self.error_type.trim();
        !error_type.is_empty() && error_type != NO_ERROR_MARKER
    }
}

impl Identified for SentenceCorrection {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Count of corrections per error type, skipping error-free sentences.
pub fn error_type_histogram(items: &[SentenceCorrection]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items.iter().filter(|i| i.has_error()) {
        *counts.entry(item.error_type.trim().to_string()).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorTypeSummary {
    pub total_errors: usize,
    /// Most frequent first; ties by name
    pub ranked: Vec<(String, usize)>,
    /// Share of the most frequent type, rounded to a whole percent
    pub top_percentage: u32,
}

impl ErrorTypeSummary {
    pub fn top(&self) -> Option<&(String, usize)> {
        self.ranked.first()
    }
}

/// `None` when there are no errors to summarize.
pub fn summarize_error_types(histogram: &BTreeMap<String, usize>) -> Option<ErrorTypeSummary> {
    let mut ranked: Vec<(String, usize)> = histogram
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(k, v)| (k.clone(), *v))
        .collect();

    if ranked.is_empty() {
        return None;
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let total_errors: usize = ranked.iter().map(|(_, c)| c).sum();
    let top_percentage = ((ranked[0].1 as f64 / total_errors as f64) * 100.0).round() as u32;

    Some(ErrorTypeSummary {
        total_errors,
        ranked,
        top_percentage,
    })
}

pub struct CorrectionLog {
    store: RecordStore,
}

impl CorrectionLog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Newest first, at most 100 entries
    pub fn list(&self) -> Result<Vec<SentenceCorrection>> {
        Ok(self.store.read_or_default(RecordKey::SentenceHistory)?)
    }

    pub fn add(&self, correction: SentenceCorrection) -> Result<()> {
        let cap = RecordKey::SentenceHistory.cap().unwrap_or(CORRECTION_CAP);
        self.store
            .append_capped(RecordKey::SentenceHistory, correction, cap)?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<SentenceCorrection, _>(RecordKey::SentenceHistory, id)?)
    }

    pub fn error_types(&self) -> Result<BTreeMap<String, usize>> {
        Ok(error_type_histogram(&self.list()?))
    }

    pub fn summary(&self) -> Result<Option<ErrorTypeSummary>> {
        Ok(summarize_error_types(&self.error_types()?))
    }
}

impl Clone for CorrectionLog {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
