//! Retrieval and generation collaborators.
//!
//! Embedding, vector search, and text generation live in external services;
//! this module only defines the seams the pipeline consumes and the thin
//! HTTP clients that reach the sidecars. Collaborator handles are built once
//! at startup and injected, never held as ambient globals.

pub mod http;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use http::{HttpGenerator, HttpRetriever};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockGenerator, MockRetriever};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a retrieval or generation collaborator.
#[derive(Debug, Error)]
pub enum RagError {
    /// The collaborator could not be reached or returned a failure status.
    #[error("collaborator request failed: {message}")]
    RequestFailed { message: String },

    /// The collaborator answered with a payload that violates its contract.
    #[error("malformed collaborator response: {message}")]
    BadResponse { message: String },
}

impl From<reqwest::Error> for RagError {
    fn from(e: reqwest::Error) -> Self {
        RagError::RequestFailed {
            message: e.to_string(),
        }
    }
}

/// Ranked retrieval evidence: passages with index-aligned distance scores,
/// lower = more similar.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    pub sources: Vec<String>,
    pub scores: Vec<f64>,
}

impl Retrieval {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Turns a question into ranked passages with similarity scores.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, question: &str, top_k: usize) -> Result<Retrieval, RagError>;
}

/// Turns a question plus supporting passages into prose.
///
/// May return the canonical refusal sentence when it judges its own output
/// insufficient; the pipeline detects that by literal match.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, question: &str, sources: &[String]) -> Result<String, RagError>;
}
