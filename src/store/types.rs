//! Persistent record types for chats, messages, cached answers, and the
//! activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::Confidence;

/// A chat session. Freshness (`updated_at`) is refreshed whenever a new
/// turn lands in the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    pub fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a chat, ordered by timestamp within the chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub role: Role,
    pub content: String,
    pub metadata: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: &str, role: Role, content: &str, metadata: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.to_string(),
            role,
            content: content.to_string(),
            metadata,
            timestamp: Utc::now(),
        }
    }
}

/// A cached question→answer record, keyed by the exact question string.
///
/// Invariant: every persisted record has `confidence == High` and an answer
/// longer than the configured character floor. Mutated only by the access
/// counter bump on a cache hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub confidence: Confidence,
    pub sources: Vec<String>,
    pub scores: Vec<f64>,
    pub access_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Immutable audit record, one per handled question regardless of outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub question: String,
    pub answer: String,
    pub confidence: Confidence,
    pub sources: Vec<String>,
    pub was_cached: bool,
    pub retrieval_time: f64,
    pub generation_time: f64,
    pub chat_id: Option<String>,
    pub scores: Vec<f64>,
    pub timestamp: DateTime<Utc>,
}
