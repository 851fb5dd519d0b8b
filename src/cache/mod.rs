//! Exact-match answer cache over the document store.
//!
//! The cache key is the normalized question string itself: no hashing, no
//! semantic matching. Admission is gated: only High-confidence answers above
//! the length floor that pass the sanity filter are persisted. Caching is a
//! best-effort optimization; a store fault during admission is reported as
//! "not cached", never as a request failure.


use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::policy::{Confidence, sanity_check};
use crate::store::{AnswerRecord, DocumentStore, StoreResult};

/// Lookup and admission interface for cached answers.
#[derive(Clone)]
pub struct AnswerCache {
    store: Arc<dyn DocumentStore>,
    min_answer_chars: usize,
}

impl AnswerCache {
    pub fn new(store: Arc<dyn DocumentStore>, min_answer_chars: usize) -> Self {
        Self {
            store,
            min_answer_chars,
        }
    }

    /// Exact-string lookup. On a hit the access counter is bumped as a side
    /// effect; the counter is popularity bookkeeping only and is never
    /// surfaced to callers, so a failed bump downgrades to a warning rather
    /// than spoiling the hit.
    pub async fn lookup(&self, question: &str) -> StoreResult<Option<AnswerRecord>> {
        let found = self.store.find_answer(question).await?;

        if found.is_some() {
            debug!("answer cache hit");
            if let Err(e) = self.store.increment_access(question).await {
                warn!(error = %e, "failed to bump cache access counter");
            }
        }

        Ok(found)
    }

    /// Persists a new answer record iff the confidence is High, the answer
    /// clears the length floor, and the sanity filter passes. Returns whether
    /// the write happened; persistence faults are caught and reported as
    /// `false`.
    pub async fn admit(
        &self,
        question: &str,
        answer: &str,
        confidence: Confidence,
        sources: &[String],
        scores: &[f64],
    ) -> bool {
        if !confidence.is_high() {
            return false;
        }

        if answer.trim().chars().count() <= self.min_answer_chars {
            debug!("answer below length floor, not caching");
            return false;
        }

        if !sanity_check(question, answer) {
            warn!("sanity filter vetoed cache admission");
            return false;
        }

        let record = AnswerRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            confidence,
            sources: sources.to_vec(),
            scores: scores.to_vec(),
            access_count: 0,
            created_at: Utc::now(),
        };

        match self.store.insert_answer(record).await {
            Ok(()) => {
                debug!("answer admitted to cache");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to persist answer to cache");
                false
            }
        }
    }
}
