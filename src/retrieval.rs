//! Similarity-ranked retrieval.
//!
//! Scores all of a user's stored chunks against a query embedding by cosine
//! similarity blended with a linear recency decay, then returns the top-K.
//! Retrieval is a full scan over one user's chunks scored in Rust; no
//! approximate nearest-neighbor index is involved.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::store::{ChunkStore, MemoryChunk};

/// A matched chunk with its score breakdown. Ephemeral — computed per query,
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedContext {
    pub chunk: MemoryChunk,
    /// Cosine similarity of query vs. chunk embedding.
    pub similarity: f64,
    /// Linear decay in [0, 1]; 1 = created now, 0 at the window edge.
    pub recency: f64,
    /// `similarity * similarity_weight + recency * recency_weight`.
    pub score: f64,
}

/// Scoring knobs, taken from `[retrieval]` config.
#[derive(Debug, Clone, Copy)]
pub struct RankingParams {
    pub similarity_weight: f64,
    pub recency_weight: f64,
    pub recency_window: Duration,
}

impl RankingParams {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self {
            similarity_weight: config.similarity_weight,
            recency_weight: config.recency_weight,
            recency_window: Duration::days(config.recency_window_days),
        }
    }
}

impl Default for RankingParams {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

/// Fetch all chunks for `user_id` and return the `limit` best matches for
/// `query_embedding`, sorted descending by blended score. An empty store
/// yields an empty result, never an error.
pub fn retrieve(
    store: &dyn ChunkStore,
    user_id: &str,
    query_embedding: &[f32],
    limit: usize,
    params: RankingParams,
) -> Result<Vec<RetrievedContext>> {
    let chunks = store.list_by_user(user_id)?;
    Ok(rank_chunks(chunks, query_embedding, limit, params, Utc::now()))
}

/// Pure scoring core: score, sort, truncate. `now` is injected so decay
/// boundaries are testable without clock control.
pub fn rank_chunks(
    chunks: Vec<MemoryChunk>,
    query_embedding: &[f32],
    limit: usize,
    params: RankingParams,
    now: DateTime<Utc>,
) -> Vec<RetrievedContext> {
    let mut scored: Vec<RetrievedContext> = chunks
        .into_iter()
        .map(|chunk| {
            let similarity = cosine_similarity(&chunk.embedding, query_embedding);
            let recency = recency_score(chunk.created_at, now, params.recency_window);
            let score =
                similarity * params.similarity_weight + recency * params.recency_weight;
            RetrievedContext {
                chunk,
                similarity,
                recency,
                score,
            }
        })
        .collect();

    // Stable sort keeps tie order deterministic
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// Cosine similarity between two vectors.
///
/// Mismatched lengths or a zero-magnitude vector score 0.0 — never a panic,
/// never NaN. Dimension mismatch happens when chunks indexed under one
/// embedding provider are queried under another; it degrades instead of
/// erroring.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Linear recency decay: 1.0 at creation, 0.0 at the window edge and beyond.
/// Future-dated chunks (clock skew) clamp to 1.0.
pub fn recency_score(created_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> f64 {
    let window_ms = window.num_milliseconds();
    if window_ms <= 0 {
        return 0.0;
    }
    let age_ms = (now - created_at).num_milliseconds();
    let raw = 1.0 - age_ms as f64 / window_ms as f64;
    raw.clamp(0.0, 1.0)
}
