//! Pipeline error types.

use thiserror::Error;

use crate::rag::RagError;
use crate::store::StoreError;

/// A fault that aborts the whole request. Policy refusals are not errors;
/// they are a valid terminal state carried in the response payload.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The retrieval collaborator failed.
    #[error("retrieval failed: {0}")]
    Retrieval(#[source] RagError),

    /// The generation collaborator failed.
    #[error("generation failed: {0}")]
    Generation(#[source] RagError),

    /// The document store failed on the critical path (cache lookup).
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}
