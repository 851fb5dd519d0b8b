//! Canned collaborators for tests and mock mode.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Generator, RagError, Retrieval, Retriever};
use crate::policy::REFUSAL_MESSAGE;

/// Retriever returning a fixed passage set; counts calls.
#[derive(Clone)]
pub struct MockRetriever {
    result: Retrieval,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockRetriever {
    /// Retriever that always returns the given (passage, score) pairs.
    pub fn with_passages(passages: Vec<(&str, f64)>) -> Self {
        let (sources, scores) = passages
            .into_iter()
            .map(|(s, d)| (s.to_string(), d))
            .unzip();
        Self {
            result: Retrieval { sources, scores },
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Retriever that finds nothing.
    pub fn empty() -> Self {
        Self::with_passages(vec![])
    }

    /// Retriever whose backend is down.
    pub fn failing() -> Self {
        Self {
            result: Retrieval::default(),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn retrieve(&self, _question: &str, top_k: usize) -> Result<Retrieval, RagError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RagError::RequestFailed {
                message: "mock retriever down".to_string(),
            });
        }
        let mut result = self.result.clone();
        result.sources.truncate(top_k);
        result.scores.truncate(top_k);
        Ok(result)
    }
}

/// Generator returning a fixed answer; counts calls.
#[derive(Clone)]
pub struct MockGenerator {
    answer: String,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockGenerator {
    pub fn with_answer(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Generator that self-refuses with the canonical sentence.
    pub fn refusing() -> Self {
        Self::with_answer(REFUSAL_MESSAGE)
    }

    /// Generator whose backend is down.
    pub fn failing() -> Self {
        Self {
            answer: String::new(),
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _question: &str, _sources: &[String]) -> Result<String, RagError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RagError::RequestFailed {
                message: "mock generator down".to_string(),
            });
        }
        Ok(self.answer.clone())
    }
}
