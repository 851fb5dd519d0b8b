//! Assay library crate (used by the server binary and integration tests).
//!
//! Assay is a confidence-gated answering service: questions flow through an
//! exact-match answer cache, an external retrieval collaborator, an evidence
//! gate, an external generation collaborator, and a post-generation gate
//! before anything is surfaced or cached. The exports are organized by module:
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`AnswerPipeline`], [`AnswerPayload`] - The answering state machine
//! - [`RefusalPolicy`], [`Confidence`], [`Verdict`] - Confidence gating
//! - [`AnswerCache`] - Exact-match cache over the document store
//!
//! ## Collaborators
//! - [`Retriever`], [`Generator`] - Seams the pipeline consumes
//! - [`HttpRetriever`], [`HttpGenerator`] - HTTP sidecar clients
//!
//! ## Persistence
//! - [`DocumentStore`], [`MemoryStore`] - Chats, messages, answers, activity
//! - [`SessionRecorder`], [`ActivityLogger`] - Best-effort write-behind
//!
//! ## Test/Mock Support
//! Mock collaborators and a fault-injecting store are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod gateway;
pub mod history;
pub mod pipeline;
pub mod policy;
pub mod rag;
pub mod store;

pub use cache::AnswerCache;
pub use config::{Config, ConfigError};
pub use gateway::{HandlerState, create_router_with_state};
pub use history::{ActivityLogger, SessionRecorder};
pub use pipeline::{AnswerPayload, AnswerPipeline, PipelineError};
pub use policy::{
    Confidence, EVIDENCE_MARKERS, REFUSAL_MESSAGE, RefusalPolicy, Verdict, evidence_floor,
    is_refusal, sanity_check,
};
pub use rag::{Generator, HttpGenerator, HttpRetriever, RagError, Retrieval, Retriever};
#[cfg(any(test, feature = "mock"))]
pub use rag::{MockGenerator, MockRetriever};
pub use store::{
    ActivityEntry, AnswerRecord, ChatSession, DocumentStore, MemoryStore, Message, Role,
    StoreError, StoreResult,
};
#[cfg(any(test, feature = "mock"))]
pub use store::FlakyStore;
