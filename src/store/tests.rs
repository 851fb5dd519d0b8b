use chrono::Utc;

use super::types::{AnswerRecord, Message, Role};
use super::{DocumentStore, MemoryStore};
use crate::policy::Confidence;

fn record(question: &str) -> AnswerRecord {
    AnswerRecord {
        question: question.to_string(),
        answer: "A grounded answer that is comfortably long enough.".to_string(),
        confidence: Confidence::High,
        sources: vec!["passage".to_string()],
        scores: vec![0.4],
        access_count: 0,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_chat_crud_roundtrip() {
    let store = MemoryStore::new();

    let chat = store.create_chat("New Chat").await.unwrap();
    assert_eq!(chat.title, "New Chat");

    let fetched = store.get_chat(&chat.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, chat.id);

    store.rename_chat(&chat.id, "RAG questions").await.unwrap();
    let fetched = store.get_chat(&chat.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "RAG questions");

    store.delete_chat(&chat.id).await.unwrap();
    assert!(store.get_chat(&chat.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_chats_most_recent_first() {
    let store = MemoryStore::new();

    let older = store.create_chat("older").await.unwrap();
    let newer = store.create_chat("newer").await.unwrap();
    store.touch_chat(&newer.id).await.unwrap();

    let chats = store.list_chats().await.unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats[0].id, newer.id);
    assert_eq!(chats[1].id, older.id);
}

#[tokio::test]
async fn test_messages_ordered_and_scoped_to_chat() {
    let store = MemoryStore::new();
    let chat = store.create_chat("chat").await.unwrap();
    let other = store.create_chat("other").await.unwrap();

    store
        .append_message(Message::new(
            &chat.id,
            Role::User,
            "What is RAG?",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    store
        .append_message(Message::new(
            &chat.id,
            Role::Assistant,
            "An answer.",
            serde_json::json!({"cached": false}),
        ))
        .await
        .unwrap();
    store
        .append_message(Message::new(
            &other.id,
            Role::User,
            "unrelated",
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    let messages = store.messages_for_chat(&chat.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
}

#[tokio::test]
async fn test_delete_chat_removes_its_messages() {
    let store = MemoryStore::new();
    let chat = store.create_chat("chat").await.unwrap();
    store
        .append_message(Message::new(
            &chat.id,
            Role::User,
            "hello",
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    store.delete_chat(&chat.id).await.unwrap();
    assert!(store.messages_for_chat(&chat.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_answer_lookup_is_exact_match() {
    let store = MemoryStore::new();
    store.insert_answer(record("What is RAG?")).await.unwrap();

    assert!(store.find_answer("What is RAG?").await.unwrap().is_some());
    assert!(store.find_answer("what is rag?").await.unwrap().is_none());
    assert!(store.find_answer("What is RAG").await.unwrap().is_none());
}

#[tokio::test]
async fn test_increment_access() {
    let store = MemoryStore::new();
    store.insert_answer(record("Q")).await.unwrap();

    store.increment_access("Q").await.unwrap();
    store.increment_access("Q").await.unwrap();

    let found = store.find_answer("Q").await.unwrap().unwrap();
    assert_eq!(found.access_count, 2);
}

#[tokio::test]
async fn test_duplicate_inserts_tolerated() {
    let store = MemoryStore::new();
    store.insert_answer(record("Q")).await.unwrap();
    store.insert_answer(record("Q")).await.unwrap();

    assert_eq!(store.answer_count(), 2);
    // Lookup still resolves deterministically to the first record.
    assert!(store.find_answer("Q").await.unwrap().is_some());
}
