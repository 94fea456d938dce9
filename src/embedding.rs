//! Embedding provider capability interface and HTTP implementation.
//!
//! The pipeline talks to embeddings only through [`EmbeddingModel`], so
//! tests substitute deterministic doubles without network access. The
//! production implementation targets an OpenAI-compatible `/embeddings`
//! endpoint.
//!
//! Calls are made exactly once per batch with no retries; the configured
//! timeout surfaces as [`Error::Timeout`], everything else as
//! [`Error::Embedding`].

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Capability interface for mapping text to fixed-length vectors.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Model identifier (e.g. `"text-embedding-3-small"`).
    fn model_name(&self) -> &str;

    /// Vector dimensionality for the configured model.
    fn dims(&self) -> usize;

    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Embedding client for an OpenAI-compatible `/embeddings` endpoint.
pub struct HttpEmbeddingModel {
    model: String,
    dims: usize,
    url: String,
    api_key: String,
    client: reqwest::Client,
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

impl HttpEmbeddingModel {
    pub fn new(provider: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            model: provider.embedding_model.clone(),
            dims: provider.embedding_dims,
            url: format!("{}/embeddings", provider.api_base.trim_end_matches('/')),
            api_key: provider.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl EmbeddingModel for HttpEmbeddingModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn dims(&self) -> usize {
        self.dims
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({
            "model": self.model,
            "input": texts,
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("embedding request: {}", e))
                } else {
                    Error::Embedding(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "provider returned {}: {}",
                status, detail
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("malformed embedding response: {}", e)))?;

        if parsed.data.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        // Re-order by the provider's index field so output matches input.
        let mut items = parsed.data;
        items.sort_by_key(|item| item.index);

        let mut vectors = Vec::with_capacity(items.len());
        for item in items {
            if item.embedding.len() != self.dims {
                return Err(Error::Embedding(format!(
                    "expected {} dims, got {}",
                    self.dims,
                    item.embedding.len()
                )));
            }
            vectors.push(item.embedding);
        }
        Ok(vectors)
    }
}
