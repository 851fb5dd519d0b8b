use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::gateway::validate::{validate_question, validate_title};
use crate::pipeline::AnswerPayload;
use crate::store::{ChatSession, Message};

#[derive(Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub chat_id: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Deserialize)]
pub struct RenameChatRequest {
    #[serde(default)]
    pub title: String,
}

/// Main endpoint: answers a question through the confidence-gated pipeline.
#[instrument(skip(state, request), fields(has_chat = request.chat_id.is_some()))]
pub async fn ask_handler(
    State(state): State<HandlerState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AnswerPayload>, GatewayError> {
    let question = validate_question(&request.question, state.max_question_len)
        .map_err(|msg| GatewayError::InvalidInput(msg.to_string()))?;

    let payload = state
        .pipeline
        .answer(&question, request.chat_id.as_deref())
        .await?;

    info!(
        confidence = %payload.confidence,
        cached = payload.cached,
        "question answered"
    );
    Ok(Json(payload))
}

/// All chat sessions, most recently updated first.
pub async fn list_chats_handler(
    State(state): State<HandlerState>,
) -> Result<Json<Vec<ChatSession>>, GatewayError> {
    Ok(Json(state.store.list_chats().await?))
}

/// Creates a new chat session.
pub async fn create_chat_handler(
    State(state): State<HandlerState>,
    request: Option<Json<CreateChatRequest>>,
) -> Result<Json<ChatSession>, GatewayError> {
    let raw_title = request
        .and_then(|Json(r)| r.title)
        .unwrap_or_else(|| "New Chat".to_string());

    // A creation title only needs bounding, not the full validation path.
    let title = crate::gateway::validate::sanitize_input(&raw_title, state.max_title_len);
    let title = if title.is_empty() {
        "New Chat"
    } else {
        title.as_str()
    };

    let chat = state.store.create_chat(title).await?;
    info!(chat_id = %chat.id, "chat created");
    Ok(Json(chat))
}

/// All messages for a chat, oldest first. Empty for unknown chats.
pub async fn chat_messages_handler(
    State(state): State<HandlerState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<Message>>, GatewayError> {
    Ok(Json(state.store.messages_for_chat(&chat_id).await?))
}

/// Deletes a chat session and all its messages.
pub async fn delete_chat_handler(
    State(state): State<HandlerState>,
    Path(chat_id): Path<String>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    state.store.delete_chat(&chat_id).await?;
    info!(chat_id = %chat_id, "chat deleted");
    Ok(Json(serde_json::json!({
        "message": "Chat deleted successfully"
    })))
}

/// Renames a chat session.
pub async fn rename_chat_handler(
    State(state): State<HandlerState>,
    Path(chat_id): Path<String>,
    Json(request): Json<RenameChatRequest>,
) -> Result<Json<serde_json::Value>, GatewayError> {
    let title = validate_title(&request.title, state.max_title_len)
        .map_err(|msg| GatewayError::InvalidInput(msg.to_string()))?;

    state.store.rename_chat(&chat_id, &title).await?;
    Ok(Json(serde_json::json!({
        "message": "Title updated successfully",
        "title": title,
    })))
}
