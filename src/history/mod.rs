//! Chat history and audit-trail bookkeeping.
//!
//! Both writers run after the answering decision is final and are strictly
//! best-effort: a failed history or audit write is logged and never masks an
//! otherwise-successful answer.


use std::sync::Arc;
use tracing::warn;

use crate::pipeline::AnswerPayload;
use crate::store::{ActivityEntry, DocumentStore, Message, Role};

/// Appends user/assistant turns to a chat and refreshes its freshness.
///
/// No-op without a chat id. Never creates a chat; the chat must already
/// exist; turns appended to an unknown id are the store's concern.
#[derive(Clone)]
pub struct SessionRecorder {
    store: Arc<dyn DocumentStore>,
}

impl SessionRecorder {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, chat_id: Option<&str>, question: &str, payload: &AnswerPayload) {
        let Some(chat_id) = chat_id else {
            return;
        };

        let mut metadata = serde_json::json!({
            "cached": payload.cached,
            "confidence": payload.confidence,
            "sources": payload.sources,
        });
        if let Some(t) = payload.retrieval_time {
            metadata["retrieval_time"] = serde_json::json!(t);
        }
        if let Some(t) = payload.generation_time {
            metadata["generation_time"] = serde_json::json!(t);
        }

        let user = Message::new(chat_id, Role::User, question, serde_json::json!({}));
        if let Err(e) = self.store.append_message(user).await {
            warn!(error = %e, chat_id, "failed to record user message");
        }

        let assistant = Message::new(chat_id, Role::Assistant, &payload.answer, metadata);
        if let Err(e) = self.store.append_message(assistant).await {
            warn!(error = %e, chat_id, "failed to record assistant message");
        }

        if let Err(e) = self.store.touch_chat(chat_id).await {
            warn!(error = %e, chat_id, "failed to refresh chat timestamp");
        }
    }
}

/// Append-only audit trail; observes every handled question, cached or not.
#[derive(Clone)]
pub struct ActivityLogger {
    store: Arc<dyn DocumentStore>,
}

impl ActivityLogger {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn log(&self, entry: ActivityEntry) {
        if let Err(e) = self.store.append_activity(entry).await {
            warn!(error = %e, "failed to append activity log entry");
        }
    }
}
