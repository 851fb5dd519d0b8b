//! Process-local document store.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::types::{ActivityEntry, AnswerRecord, ChatSession, Message};
use super::{DocumentStore, StoreResult};

#[derive(Default)]
struct Collections {
    chats: HashMap<String, ChatSession>,
    messages: Vec<Message>,
    // Vec, not a map: duplicate inserts for the same question are tolerated
    // and lookups return the earliest record, like find_one on an unindexed
    // collection.
    answers: Vec<AnswerRecord>,
    activity: Vec<ActivityEntry>,
}

/// In-memory [`DocumentStore`] used by the server binary and by tests.
///
/// Every operation takes the lock once and is atomic with respect to other
/// requests, which is all the answering core assumes of its store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached answer records (duplicates included).
    pub fn answer_count(&self) -> usize {
        self.inner.read().answers.len()
    }

    /// Number of activity log entries.
    pub fn activity_count(&self) -> usize {
        self.inner.read().activity.len()
    }

    /// Snapshot of the activity log, oldest first.
    pub fn activity_entries(&self) -> Vec<ActivityEntry> {
        self.inner.read().activity.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_chat(&self, title: &str) -> StoreResult<ChatSession> {
        let chat = ChatSession::new(title);
        self.inner.write().chats.insert(chat.id.clone(), chat.clone());
        Ok(chat)
    }

    async fn list_chats(&self) -> StoreResult<Vec<ChatSession>> {
        let mut chats: Vec<ChatSession> = self.inner.read().chats.values().cloned().collect();
        chats.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(chats)
    }

    async fn get_chat(&self, id: &str) -> StoreResult<Option<ChatSession>> {
        Ok(self.inner.read().chats.get(id).cloned())
    }

    async fn touch_chat(&self, id: &str) -> StoreResult<()> {
        if let Some(chat) = self.inner.write().chats.get_mut(id) {
            chat.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn rename_chat(&self, id: &str, title: &str) -> StoreResult<()> {
        if let Some(chat) = self.inner.write().chats.get_mut(id) {
            chat.title = title.to_string();
            chat.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_chat(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write();
        inner.chats.remove(id);
        inner.messages.retain(|m| m.chat_id != id);
        Ok(())
    }

    async fn append_message(&self, message: Message) -> StoreResult<()> {
        self.inner.write().messages.push(message);
        Ok(())
    }

    async fn messages_for_chat(&self, chat_id: &str) -> StoreResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .inner
            .read()
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(messages)
    }

    async fn find_answer(&self, question: &str) -> StoreResult<Option<AnswerRecord>> {
        Ok(self
            .inner
            .read()
            .answers
            .iter()
            .find(|r| r.question == question)
            .cloned())
    }

    async fn increment_access(&self, question: &str) -> StoreResult<()> {
        if let Some(record) = self
            .inner
            .write()
            .answers
            .iter_mut()
            .find(|r| r.question == question)
        {
            record.access_count += 1;
        }
        Ok(())
    }

    async fn insert_answer(&self, record: AnswerRecord) -> StoreResult<()> {
        self.inner.write().answers.push(record);
        Ok(())
    }

    async fn append_activity(&self, entry: ActivityEntry) -> StoreResult<()> {
        self.inner.write().activity.push(entry);
        Ok(())
    }
}
