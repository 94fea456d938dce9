//! The question-answering pipeline orchestrator.
//!
//! Wires the stages together for one request:
//!
//! ```text
//! documents ──▶ extract ──▶ chunk ──▶ embed ──▶ VectorIndex
//!                                                   │
//! question ──▶ rewrite (history-aware) ──▶ embed ──▶ retrieve top-k
//!                                                   │
//!                        answer prompt ◀── context ─┘
//!                              │
//!                         chat model ──▶ answer string
//! ```
//!
//! Every call re-runs the whole pipeline; the index is rebuilt from
//! scratch and nothing is reused across calls, even for an identical
//! document set.

use std::sync::Arc;

use crate::chunk::split_text;
use crate::config::Config;
use crate::embedding::EmbeddingModel;
use crate::error::{Error, Result};
use crate::extract::TextExtractor;
use crate::index::VectorIndex;
use crate::llm::ChatModel;
use crate::models::{ChatTurn, UploadedDocument};
use crate::prompt::{answer_messages, rewrite_messages, CONTEXT_SEPARATOR};

/// Pipeline tuning taken from [`Config`] at construction time.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub separator: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            separator: config.chunking.separator.clone(),
            chunk_size: config.chunking.chunk_size,
            chunk_overlap: config.chunking.chunk_overlap,
            top_k: config.retrieval.top_k,
        }
    }
}

/// Orchestrates extract → chunk → embed → retrieve → compose for one
/// request. Holds only capability handles; all per-request state lives on
/// the stack of [`answer`](QaPipeline::answer).
pub struct QaPipeline {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingModel>,
    chat: Arc<dyn ChatModel>,
    options: PipelineOptions,
}

impl QaPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingModel>,
        chat: Arc<dyn ChatModel>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            embedder,
            chat,
            options,
        }
    }

    /// Answer `question` from `documents`.
    ///
    /// The chat history starts empty on every call: multi-turn memory is
    /// not retained across requests. A caller that does persist turns can
    /// use [`answer_with_history`](Self::answer_with_history) instead.
    pub async fn answer(
        &self,
        documents: &[UploadedDocument],
        question: &str,
    ) -> Result<String> {
        let history: Vec<ChatTurn> = Vec::new();
        self.answer_with_history(documents, question, &history).await
    }

    /// Answer `question` from `documents`, rewriting it against `history`
    /// first. Fails fast with [`Error::InvalidRequest`] before any
    /// provider call when documents are missing or the question is blank.
    pub async fn answer_with_history(
        &self,
        documents: &[UploadedDocument],
        question: &str,
        history: &[ChatTurn],
    ) -> Result<String> {
        if documents.is_empty() {
            return Err(Error::InvalidRequest(
                "at least one PDF document is required".to_string(),
            ));
        }
        if question.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "question must not be empty".to_string(),
            ));
        }

        let text = self.extractor.extract(documents)?;
        let chunks = split_text(
            &text,
            &self.options.separator,
            self.options.chunk_size,
            self.options.chunk_overlap,
        );
        tracing::debug!(
            documents = documents.len(),
            characters = text.chars().count(),
            chunks = chunks.len(),
            "extracted and chunked"
        );

        let vectors = if chunks.is_empty() {
            Vec::new()
        } else {
            tracing::debug!(
                model = self.embedder.model_name(),
                dims = self.embedder.dims(),
                chunks = chunks.len(),
                "embedding chunks"
            );
            self.embedder.embed_many(&chunks).await?
        };
        let index = VectorIndex::build(chunks, vectors)?;

        let standalone = self.rewrite_question(history, question).await?;

        let retrieved: Vec<String> = if index.is_empty() {
            Vec::new()
        } else {
            let query_vector = self
                .embedder
                .embed_many(std::slice::from_ref(&standalone))
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Embedding("empty embedding response".to_string()))?;
            index
                .retrieve(&query_vector, self.options.top_k)
                .into_iter()
                .map(str::to_string)
                .collect()
        };
        tracing::debug!(retrieved = retrieved.len(), "retrieval complete");

        let context = retrieved.join(CONTEXT_SEPARATOR);
        let messages = answer_messages(&context, history, &standalone);
        tracing::debug!(model = self.chat.model_name(), "composing answer");
        self.chat.complete(&messages).await
    }

    /// Produce a standalone question. With no history the input is
    /// returned unchanged and no model call is made; otherwise the model
    /// reformulates it and the reply is normalized to a single line.
    async fn rewrite_question(&self, history: &[ChatTurn], question: &str) -> Result<String> {
        if history.is_empty() {
            return Ok(question.to_string());
        }
        let messages = rewrite_messages(history, question);
        let reply = self.chat.complete(&messages).await?;
        let line = reply
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("")
            .to_string();
        if line.is_empty() {
            // A blank reformulation is useless; keep the original question.
            Ok(question.to_string())
        } else {
            Ok(line)
        }
    }
}
