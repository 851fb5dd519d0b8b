//! Fault-injecting store wrapper for exercising best-effort write paths.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::types::{ActivityEntry, AnswerRecord, ChatSession, Message};
use super::{DocumentStore, MemoryStore, StoreError, StoreResult};

/// Wraps a [`MemoryStore`] and fails selected operation groups on demand.
///
/// Reads stay healthy unless `fail_reads` is set, so tests can verify that a
/// broken cache write or log write never breaks an otherwise-good answer.
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_answer_writes: AtomicBool,
    fail_history_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::new(),
            fail_reads: AtomicBool::new(false),
            fail_answer_writes: AtomicBool::new(false),
            fail_history_writes: AtomicBool::new(false),
        })
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_answer_writes(&self, fail: bool) {
        self.fail_answer_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_history_writes(&self, fail: bool) {
        self.fail_history_writes.store(fail, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn unavailable(op: &str) -> StoreError {
        StoreError::Unavailable {
            message: format!("injected fault during {op}"),
        }
    }

    fn check(&self, flag: &AtomicBool, op: &str) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(Self::unavailable(op));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn create_chat(&self, title: &str) -> StoreResult<ChatSession> {
        self.check(&self.fail_history_writes, "create_chat")?;
        self.inner.create_chat(title).await
    }

    async fn list_chats(&self) -> StoreResult<Vec<ChatSession>> {
        self.check(&self.fail_reads, "list_chats")?;
        self.inner.list_chats().await
    }

    async fn get_chat(&self, id: &str) -> StoreResult<Option<ChatSession>> {
        self.check(&self.fail_reads, "get_chat")?;
        self.inner.get_chat(id).await
    }

    async fn touch_chat(&self, id: &str) -> StoreResult<()> {
        self.check(&self.fail_history_writes, "touch_chat")?;
        self.inner.touch_chat(id).await
    }

    async fn rename_chat(&self, id: &str, title: &str) -> StoreResult<()> {
        self.check(&self.fail_history_writes, "rename_chat")?;
        self.inner.rename_chat(id, title).await
    }

    async fn delete_chat(&self, id: &str) -> StoreResult<()> {
        self.check(&self.fail_history_writes, "delete_chat")?;
        self.inner.delete_chat(id).await
    }

    async fn append_message(&self, message: Message) -> StoreResult<()> {
        self.check(&self.fail_history_writes, "append_message")?;
        self.inner.append_message(message).await
    }

    async fn messages_for_chat(&self, chat_id: &str) -> StoreResult<Vec<Message>> {
        self.check(&self.fail_reads, "messages_for_chat")?;
        self.inner.messages_for_chat(chat_id).await
    }

    async fn find_answer(&self, question: &str) -> StoreResult<Option<AnswerRecord>> {
        self.check(&self.fail_reads, "find_answer")?;
        self.inner.find_answer(question).await
    }

    async fn increment_access(&self, question: &str) -> StoreResult<()> {
        self.check(&self.fail_answer_writes, "increment_access")?;
        self.inner.increment_access(question).await
    }

    async fn insert_answer(&self, record: AnswerRecord) -> StoreResult<()> {
        self.check(&self.fail_answer_writes, "insert_answer")?;
        self.inner.insert_answer(record).await
    }

    async fn append_activity(&self, entry: ActivityEntry) -> StoreResult<()> {
        self.check(&self.fail_history_writes, "append_activity")?;
        self.inner.append_activity(entry).await
    }
}
