//! Router-level tests for the gateway: validation, answering, chat CRUD.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::Config;
use crate::gateway::create_router_with_state;
use crate::gateway::state::HandlerState;
use crate::pipeline::AnswerPipeline;
use crate::rag::{MockGenerator, MockRetriever};
use crate::store::{DocumentStore, MemoryStore};

const LONG_ANSWER: &str =
    "Retrieval-augmented generation retrieves supporting passages and then generates an answer.";

fn test_config() -> Config {
    Config {
        mock_rag: true,
        ..Config::default()
    }
}

fn app() -> (Router, Arc<MemoryStore>) {
    app_with(
        MockRetriever::with_passages(vec![("passage about retrieval", 0.4)]),
        MockGenerator::with_answer(LONG_ANSWER),
    )
}

fn app_with(retriever: MockRetriever, generator: MockGenerator) -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let pipeline = Arc::new(AnswerPipeline::new(
        &config,
        store.clone(),
        Arc::new(retriever),
        Arc::new(generator),
    ));
    let state = HandlerState::new(
        pipeline,
        store.clone(),
        config.max_question_len,
        config.max_title_len,
    );
    (create_router_with_state(state), store)
}

async fn send_json(
    router: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (router, _) = app();
    let (status, body) = get_json(router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ask_returns_answer_payload() {
    let (router, _) = app();
    let (status, body) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], LONG_ANSWER);
    assert_eq!(body["confidence"], "High");
    assert_eq!(body["cached"], false);
    assert!(body["retrieval_time"].is_number());
    assert!(body["generation_time"].is_number());
}

#[tokio::test]
async fn test_ask_second_call_is_cached() {
    let (router, _) = app();

    let (_, first) = send_json(
        router.clone(),
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?"}),
    )
    .await;
    let (_, second) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?"}),
    )
    .await;

    assert_eq!(second["cached"], true);
    assert_eq!(second["answer"], first["answer"]);
    // Timings are omitted on a cache hit.
    assert!(second.get("retrieval_time").is_none());
    assert!(second.get("generation_time").is_none());
}

#[tokio::test]
async fn test_ask_rejects_missing_question() {
    let (router, _) = app();
    let (status, body) = send_json(router, "POST", "/api/ask", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
}

#[tokio::test]
async fn test_ask_rejects_too_short_question() {
    let (router, _) = app();
    let (status, _) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "hi"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ask_strips_html_from_question() {
    let (router, store) = app();
    let (status, _) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is <b>RAG</b>?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // The sanitized question is the cache key.
    assert!(
        store
            .find_answer("What is RAG?")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_ask_refusal_is_a_successful_response() {
    let (router, _) = app_with(
        MockRetriever::empty(),
        MockGenerator::with_answer(LONG_ANSWER),
    );
    let (status, body) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "Unknown topic?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confidence"], "Low");
    assert_eq!(body["sources"], serde_json::json!([]));
    assert_eq!(body["cached"], false);
}

#[tokio::test]
async fn test_ask_collaborator_fault_maps_to_bad_gateway() {
    let (router, _) = app_with(
        MockRetriever::failing(),
        MockGenerator::with_answer(LONG_ANSWER),
    );
    let (status, body) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("retrieval failed"));
}

#[tokio::test]
async fn test_ask_with_chat_records_history() {
    let (router, store) = app();
    let chat = store.create_chat("chat").await.unwrap();

    let (status, _) = send_json(
        router,
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?", "chat_id": chat.id}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let messages = store.messages_for_chat(&chat.id).await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_create_and_list_chats() {
    let (router, _) = app();

    let (status, created) = send_json(
        router.clone(),
        "POST",
        "/api/chats/new",
        serde_json::json!({"title": "My Chat"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "My Chat");
    assert!(created["id"].is_string());

    let (status, chats) = get_json(router, "/api/chats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chats.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_chat_defaults_title() {
    let (router, _) = app();
    let (status, created) =
        send_json(router, "POST", "/api/chats/new", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["title"], "New Chat");
}

#[tokio::test]
async fn test_chat_messages_endpoint() {
    let (router, store) = app();
    let chat = store.create_chat("chat").await.unwrap();

    send_json(
        router.clone(),
        "POST",
        "/api/ask",
        serde_json::json!({"question": "What is RAG?", "chat_id": chat.id}),
    )
    .await;

    let (status, messages) = get_json(router, &format!("/api/chats/{}", chat.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages.as_array().unwrap().len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
}

#[tokio::test]
async fn test_unknown_chat_returns_empty_messages() {
    let (router, _) = app();
    let (status, messages) = get_json(router, "/api/chats/no-such-chat").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages, serde_json::json!([]));
}

#[tokio::test]
async fn test_delete_chat() {
    let (router, store) = app();
    let chat = store.create_chat("chat").await.unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/chats/{}", chat.id))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.get_chat(&chat.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_rename_chat() {
    let (router, store) = app();
    let chat = store.create_chat("chat").await.unwrap();

    let (status, body) = send_json(
        router,
        "PUT",
        &format!("/api/chats/{}/title", chat.id),
        serde_json::json!({"title": "Renamed"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed");
    let fetched = store.get_chat(&chat.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "Renamed");
}

#[tokio::test]
async fn test_rename_chat_rejects_empty_title() {
    let (router, _) = app();
    let (status, _) = send_json(
        router,
        "PUT",
        "/api/chats/some-id/title",
        serde_json::json!({"title": "  "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
