use std::sync::Arc;

use crate::pipeline::AnswerPipeline;
use crate::store::DocumentStore;

/// Shared state for all gateway handlers.
#[derive(Clone)]
pub struct HandlerState {
    pub pipeline: Arc<AnswerPipeline>,

    pub store: Arc<dyn DocumentStore>,

    pub max_question_len: usize,

    pub max_title_len: usize,
}

impl HandlerState {
    pub fn new(
        pipeline: Arc<AnswerPipeline>,
        store: Arc<dyn DocumentStore>,
        max_question_len: usize,
        max_title_len: usize,
    ) -> Self {
        Self {
            pipeline,
            store,
            max_question_len,
            max_title_len,
        }
    }
}
