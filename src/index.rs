//! Per-request in-memory vector index.
//!
//! Stores (chunk, vector) pairs in insertion order and answers
//! nearest-neighbor queries by brute-force cosine similarity. The index is
//! rebuilt from scratch on every request and discarded afterwards — there
//! is no update, deletion, or persistence.

use crate::error::{Error, Result};

#[derive(Debug)]
struct IndexEntry {
    chunk: String,
    vector: Vec<f32>,
}

/// Brute-force cosine-similarity index over chunk embeddings.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Build an index from parallel chunk and vector lists.
    ///
    /// The lists must be the same length; a mismatch means the embedding
    /// provider dropped or reordered items and is treated as a provider
    /// failure.
    pub fn build(chunks: Vec<String>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(Error::Embedding(format!(
                "embedding count mismatch: {} chunks, {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }
        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the `k` stored chunks nearest to `query`, ranked by
    /// descending cosine similarity. Ties keep insertion order (the sort
    /// is stable). A `k` larger than the store returns everything.
    pub fn retrieve(&self, query: &[f32], k: usize) -> Vec<&str> {
        let mut ranked: Vec<(f32, &str)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query, &e.vector), e.chunk.as_str()))
            .collect();
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);
        ranked.into_iter().map(|(_, chunk)| chunk).collect()
    }
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`, or `0.0` for empty vectors or vectors
/// of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
