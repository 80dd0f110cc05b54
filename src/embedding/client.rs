//! OpenAI embedding client
//!
//! Sends cleaned text to the embeddings endpoint, singly or in batches.
//! Batching is an API-efficiency measure only; every call is awaited to
//! completion before the pipeline moves on.

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingVector;
use crate::error::{JobMatcherError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct EmbeddingClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    batch_size: usize,
    max_retries: usize,
    max_input_words: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                JobMatcherError::Configuration(format!(
                    "{} environment variable not set",
                    config.api_key_env
                ))
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: config.batch_size.max(1),
            max_retries: config.max_retries.max(1),
            max_input_words: config.max_input_words,
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an embedding for a single text.
    pub async fn embed_text(&self, text: &str) -> Result<EmbeddingVector> {
        let inputs = vec![self.prepare_input(text)];
        let mut embeddings = self.request_with_retry(&inputs).await?;
        embeddings
            .pop()
            .ok_or_else(|| JobMatcherError::Embedding("No embeddings returned from API".to_string()))
    }

    /// Generate embeddings for many texts, preserving input order.
    ///
    /// Inputs are chunked into batches; a batch that still fails after
    /// retries fails the whole call rather than leaving holes.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let total_batches = texts.len().div_ceil(self.batch_size);
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for (batch_num, batch) in texts.chunks(self.batch_size).enumerate() {
            debug!(
                "Embedding batch {}/{} ({} texts)",
                batch_num + 1,
                total_batches,
                batch.len()
            );

            let inputs: Vec<String> = batch.iter().map(|t| self.prepare_input(t)).collect();
            let embeddings = self.request_with_retry(&inputs).await?;
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }

    /// The API rejects empty input and caps input length, so substitute a
    /// placeholder for blank texts and truncate oversized ones by words.
    fn prepare_input(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return "empty text".to_string();
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() > self.max_input_words {
            warn!(
                "Text truncated from {} to {} words before embedding",
                words.len(),
                self.max_input_words
            );
            return words[..self.max_input_words].join(" ");
        }

        text.to_string()
    }

    async fn request_with_retry(&self, inputs: &[String]) -> Result<Vec<EmbeddingVector>> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let wait = Duration::from_secs(1 << (attempt - 1));
                debug!("Retrying embedding request in {:?}", wait);
                tokio::time::sleep(wait).await;
            }

            match self.request_embeddings(inputs).await {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(
                        "Embedding attempt {}/{} failed: {}",
                        attempt + 1,
                        self.max_retries,
                        e
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            JobMatcherError::Embedding("embedding request failed".to_string())
        }))
    }

    async fn request_embeddings(&self, inputs: &[String]) -> Result<Vec<EmbeddingVector>> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            encoding_format: "float",
        };

        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobMatcherError::Embedding(format!(
                "embedding API returned status {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: EmbeddingResponse = response.json().await?;

        // The API reports positions explicitly; sort to restore input order
        let mut data = parsed.data;
        data.sort_by_key(|item| item.index);

        if data.len() != inputs.len() {
            return Err(JobMatcherError::Embedding(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                data.len()
            )));
        }

        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}
