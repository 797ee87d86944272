//! Conversation simulator sessions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingo_records::{Identified, RecordKey, RecordStore};

use crate::Result;

const CONVERSATION_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Feedback attached to a learner's turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub evaluation: String,
    #[serde(default)]
    pub alternative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            evaluation: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            evaluation: None,
        }
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = Some(evaluation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    pub id: String,
    pub scenario: String,
    #[serde(default)]
    pub messages: Vec<ConversationMessage>,
    pub timestamp: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(scenario: impl Into<String>, messages: Vec<ConversationMessage>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scenario: scenario.into(),
            messages,
            timestamp: Utc::now(),
        }
    }

    pub fn learner_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }
}

impl Identified for ConversationSession {
    fn id(&self) -> &str {
        &self.id
    }
}

pub struct ConversationLog {
    store: RecordStore,
}

impl ConversationLog {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<ConversationSession>> {
        Ok(self.store.read_or_default(RecordKey::ConversationHistory)?)
    }

    pub fn add(&self, session: ConversationSession) -> Result<()> {
        let cap = RecordKey::ConversationHistory
            .cap()
            .unwrap_or(CONVERSATION_CAP);

        tracing::debug!(
            scenario = %session.scenario,
            turns = session.learner_turns(),
            "Saving conversation"
        );

        self.store
            .append_capped(RecordKey::ConversationHistory, session, cap)?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        Ok(self
            .store
            .remove_by_id::<ConversationSession, _>(RecordKey::ConversationHistory, id)?)
    }
}

impl Clone for ConversationLog {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}
