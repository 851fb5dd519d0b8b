//! HTTP clients for the retrieval and generation sidecars.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Generator, RagError, Retrieval, Retriever};

#[derive(Serialize)]
struct RetrieveRequest<'a> {
    question: &'a str,
    top_k: usize,
}

#[derive(Deserialize)]
struct RetrieveResponse {
    sources: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    question: &'a str,
    sources: &'a [String],
}

#[derive(Deserialize)]
struct GenerateResponse {
    answer: String,
}

/// Retrieval collaborator reached over `POST {base_url}/retrieve`.
#[derive(Clone)]
pub struct HttpRetriever {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRetriever {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn retrieve(&self, question: &str, top_k: usize) -> Result<Retrieval, RagError> {
        let url = format!("{}/retrieve", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&RetrieveRequest { question, top_k })
            .send()
            .await?
            .error_for_status()?;

        let body: RetrieveResponse = response.json().await.map_err(|e| RagError::BadResponse {
            message: e.to_string(),
        })?;

        if body.sources.len() != body.scores.len() {
            return Err(RagError::BadResponse {
                message: format!(
                    "{} sources but {} scores",
                    body.sources.len(),
                    body.scores.len()
                ),
            });
        }

        debug!(passages = body.sources.len(), "retrieval complete");
        Ok(Retrieval {
            sources: body.sources,
            scores: body.scores,
        })
    }
}

/// Generation collaborator reached over `POST {base_url}/generate`.
#[derive(Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Generator for HttpGenerator {
    async fn generate(&self, question: &str, sources: &[String]) -> Result<String, RagError> {
        let url = format!("{}/generate", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { question, sources })
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await.map_err(|e| RagError::BadResponse {
            message: e.to_string(),
        })?;

        debug!(answer_len = body.answer.len(), "generation complete");
        Ok(body.answer)
    }
}
