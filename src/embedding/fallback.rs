//! Deterministic offline embedding fallback.
//!
//! Used when no live provider is configured. Accumulates character codes
//! into buckets indexed by position modulo the vector length, then divides
//! each bucket by the input length. Same text always yields the same vector
//! and typical distinct texts rarely collide, but this is a best-effort
//! lexical approximation, not a semantic guarantee.

use super::EmbeddingProvider;
use crate::chunker::normalize_whitespace;
use crate::error::Result;

/// Dimensions of the fallback embedding space.
pub const FALLBACK_DIM: usize = 32;

/// Offline char-code bucket embedder. No network dependency.
#[derive(Debug, Default)]
pub struct FallbackEmbedder;

impl FallbackEmbedder {
    pub fn new() -> Self {
        Self
    }
}

impl EmbeddingProvider for FallbackEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let normalized = normalize_whitespace(text);
        let mut buckets = vec![0.0f32; FALLBACK_DIM];

        let mut len = 0usize;
        for (i, c) in normalized.chars().enumerate() {
            buckets[i % FALLBACK_DIM] += c as u32 as f32;
            len += 1;
        }

        // Length 1 floor keeps effectively-empty input from dividing by zero.
        let divisor = len.max(1) as f32;
        for bucket in &mut buckets {
            *bucket /= divisor;
        }

        Ok(buckets)
    }

    fn dimensions(&self) -> usize {
        FALLBACK_DIM
    }

    fn identity(&self) -> String {
        format!("fallback-charsum-{FALLBACK_DIM}")
    }
}
