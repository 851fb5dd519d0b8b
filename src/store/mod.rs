//! Document store boundary.
//!
//! The answering core consumes chat, message, answer-cache, and activity-log
//! collections through the narrow [`DocumentStore`] trait. The store is
//! assumed to provide per-document atomic read/increment/insert; nothing
//! here adds its own locking across requests. [`MemoryStore`] is the shipped
//! implementation; a database-backed store is an operational swap.

pub mod memory;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::FlakyStore;
pub use types::{ActivityEntry, AnswerRecord, ChatSession, Message, Role};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a document store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    #[error("document store unavailable: {message}")]
    Unavailable { message: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Narrow persistence interface for the answering pipeline.
///
/// Update operations on missing documents are no-ops, matching the
/// upsert-free semantics of the document database this fronts.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_chat(&self, title: &str) -> StoreResult<ChatSession>;

    /// All chat sessions, most recently updated first.
    async fn list_chats(&self) -> StoreResult<Vec<ChatSession>>;

    async fn get_chat(&self, id: &str) -> StoreResult<Option<ChatSession>>;

    /// Refreshes the chat's `updated_at` freshness timestamp.
    async fn touch_chat(&self, id: &str) -> StoreResult<()>;

    async fn rename_chat(&self, id: &str, title: &str) -> StoreResult<()>;

    /// Deletes a chat and every message in it.
    async fn delete_chat(&self, id: &str) -> StoreResult<()>;

    async fn append_message(&self, message: Message) -> StoreResult<()>;

    /// Messages for a chat, timestamp ascending. Empty for unknown chats.
    async fn messages_for_chat(&self, chat_id: &str) -> StoreResult<Vec<Message>>;

    /// Exact-match lookup of a cached answer by question string.
    async fn find_answer(&self, question: &str) -> StoreResult<Option<AnswerRecord>>;

    /// Atomically bumps the access counter of a cached answer.
    async fn increment_access(&self, question: &str) -> StoreResult<()>;

    /// Inserts a cached answer. Duplicate questions are accepted without
    /// error; uniqueness is not enforced at this layer. The orchestrator
    /// checks the cache before computing a fresh answer.
    async fn insert_answer(&self, record: AnswerRecord) -> StoreResult<()>;

    /// Appends one immutable activity record.
    async fn append_activity(&self, entry: ActivityEntry) -> StoreResult<()>;
}
