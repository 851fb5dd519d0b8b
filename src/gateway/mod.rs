//! HTTP gateway (Axum) for the answering pipeline and chat management.
//!
//! This module is primarily used by the `assay` server binary. Routes mirror
//! the narrow API the frontend consumes: one answering endpoint plus chat
//! session CRUD. Authentication and rate limiting live at the deployment
//! edge, not here.

pub mod error;
pub mod handler;
pub mod state;
pub mod validate;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::ask_handler;
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/ask", post(handler::ask_handler))
        .route("/api/chats", get(handler::list_chats_handler))
        .route("/api/chats/new", post(handler::create_chat_handler))
        .route(
            "/api/chats/{id}",
            get(handler::chat_messages_handler).delete(handler::delete_chat_handler),
        )
        .route("/api/chats/{id}/title", put(handler::rename_chat_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "assay API is running",
    })
}
