//! Answer orchestration.
//!
//! The top-level state machine: check the cache, else retrieve, gate on the
//! evidence floor, generate, gate again, admit into the cache, and record the
//! outcome. Retrieval and generation are strictly sequential (generation's
//! input is retrieval's output) and nothing here locks across requests;
//! duplicate in-flight builds of the same question are tolerated because the
//! store accepts duplicate inserts.

pub mod error;


pub use error::PipelineError;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::cache::AnswerCache;
use crate::config::Config;
use crate::history::{ActivityLogger, SessionRecorder};
use crate::policy::{Confidence, REFUSAL_MESSAGE, RefusalPolicy, Verdict, is_refusal};
use crate::rag::{Generator, Retriever};
use crate::store::{ActivityEntry, DocumentStore};

/// Response payload surfaced per answered question.
///
/// Timings are omitted on a cache hit; no collaborator ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub sources: Vec<String>,
    pub confidence: Confidence,
    pub cached: bool,
    pub scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_time: Option<f64>,
}

/// The confidence-gated answering-and-caching pipeline.
///
/// Collaborators are injected as process-lifetime handles so the whole
/// machine can be driven by fakes in tests.
#[derive(Clone)]
pub struct AnswerPipeline {
    retriever: Arc<dyn Retriever>,
    generator: Arc<dyn Generator>,
    cache: AnswerCache,
    policy: RefusalPolicy,
    recorder: SessionRecorder,
    activity: ActivityLogger,
    top_k: usize,
    min_generation_words: usize,
}

impl AnswerPipeline {
    pub fn new(
        config: &Config,
        store: Arc<dyn DocumentStore>,
        retriever: Arc<dyn Retriever>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            retriever,
            generator,
            cache: AnswerCache::new(store.clone(), config.min_answer_chars),
            policy: RefusalPolicy::new(config.confidence_threshold, config.min_answer_chars),
            recorder: SessionRecorder::new(store.clone()),
            activity: ActivityLogger::new(store),
            top_k: config.top_k,
            min_generation_words: config.min_generation_words,
        }
    }

    /// Answers one question, optionally tied to an existing chat.
    ///
    /// Every exit path records chat history (when a chat id is supplied) and
    /// exactly one activity entry before returning.
    #[instrument(skip(self, question, chat_id), fields(q_len = question.len(), has_chat = chat_id.is_some()))]
    pub async fn answer(
        &self,
        question: &str,
        chat_id: Option<&str>,
    ) -> Result<AnswerPayload, PipelineError> {
        if let Some(hit) = self.cache.lookup(question).await? {
            info!("cache hit, skipping retrieval and generation");
            let payload = AnswerPayload {
                answer: hit.answer,
                sources: hit.sources,
                confidence: hit.confidence,
                cached: true,
                scores: hit.scores,
                retrieval_time: None,
                generation_time: None,
            };
            self.record(chat_id, question, &payload).await;
            return Ok(payload);
        }

        let retrieval_start = Instant::now();
        let retrieval = self
            .retriever
            .retrieve(question, self.top_k)
            .await
            .map_err(PipelineError::Retrieval)?;
        let retrieval_time = retrieval_start.elapsed().as_secs_f64();

        debug!(
            passages = retrieval.sources.len(),
            "retrieval complete, gating on evidence floor"
        );

        if self.policy.should_skip_generation(&retrieval.scores) {
            info!(
                threshold = self.policy.threshold(),
                "evidence too weak, refusing without generating"
            );
            let payload = Self::refusal_payload(retrieval.scores, retrieval_time, 0.0);
            self.record(chat_id, question, &payload).await;
            return Ok(payload);
        }

        let generation_start = Instant::now();
        let candidate = self
            .generator
            .generate(question, &retrieval.sources)
            .await
            .map_err(PipelineError::Generation)?;
        let generation_time = generation_start.elapsed().as_secs_f64();

        let self_refused = is_refusal(&candidate)
            || candidate.split_whitespace().count() < self.min_generation_words;

        let verdict = if self_refused {
            debug!("generator self-refused");
            Verdict::Refused
        } else {
            // Post-gate runs against the original retrieval scores, never a
            // re-scored set.
            self.policy
                .evaluate(&candidate, &retrieval.sources, &retrieval.scores)
        };

        let payload = match verdict {
            Verdict::Accepted { answer, sources } => {
                let admitted = self
                    .cache
                    .admit(
                        question,
                        &answer,
                        Confidence::High,
                        &sources,
                        &retrieval.scores,
                    )
                    .await;
                debug!(admitted, "high-confidence answer");
                AnswerPayload {
                    answer,
                    sources,
                    confidence: Confidence::High,
                    cached: false,
                    scores: retrieval.scores,
                    retrieval_time: Some(retrieval_time),
                    generation_time: Some(generation_time),
                }
            }
            Verdict::Refused => {
                info!("post-generation gate refused the candidate answer");
                Self::refusal_payload(retrieval.scores, retrieval_time, generation_time)
            }
        };

        self.record(chat_id, question, &payload).await;
        Ok(payload)
    }

    fn refusal_payload(scores: Vec<f64>, retrieval_time: f64, generation_time: f64) -> AnswerPayload {
        AnswerPayload {
            answer: REFUSAL_MESSAGE.to_string(),
            sources: Vec::new(),
            confidence: Confidence::Low,
            cached: false,
            scores,
            retrieval_time: Some(retrieval_time),
            generation_time: Some(generation_time),
        }
    }

    /// RECORD: chat history (if any) plus exactly one activity entry.
    async fn record(&self, chat_id: Option<&str>, question: &str, payload: &AnswerPayload) {
        self.recorder.record(chat_id, question, payload).await;

        self.activity
            .log(ActivityEntry {
                question: question.to_string(),
                answer: payload.answer.clone(),
                confidence: payload.confidence,
                sources: payload.sources.clone(),
                was_cached: payload.cached,
                retrieval_time: payload.retrieval_time.unwrap_or(0.0),
                generation_time: payload.generation_time.unwrap_or(0.0),
                chat_id: chat_id.map(str::to_string),
                scores: payload.scores.clone(),
                timestamp: Utc::now(),
            })
            .await;
    }
}
