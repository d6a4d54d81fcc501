//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait and two interchangeable
//! implementations: [`remote::RemoteEmbedder`] for an OpenAI-compatible
//! embeddings API, and [`fallback::FallbackEmbedder`], a deterministic
//! offline embedder. The provider is chosen once from configuration by
//! [`create_provider`] (API-key presence is the sole selector) and injected
//! wherever embeddings are needed.
//!
//! The two embedding spaces are not comparable: chunks indexed with one
//! provider must be queried with the same provider. The store records which
//! provider wrote it and warns on mismatch (see [`crate::db::migrations`]).

pub mod fallback;
pub mod remote;

use crate::config::EmbeddingConfig;
use crate::error::Result;

/// Trait for embedding text into vectors.
///
/// Implementations produce vectors of exactly [`dimensions`](Self::dimensions)
/// length. Methods are synchronous — callers in async contexts should use
/// `tokio::task::spawn_blocking`.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text string into a vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of text strings. Implementations may override for
    /// batched requests.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Number of dimensions this provider produces.
    fn dimensions(&self) -> usize;

    /// Stable identifier for the embedding space this provider writes,
    /// recorded in the store to catch provider mixups across restarts.
    fn identity(&self) -> String;
}

/// Create an embedding provider from config.
///
/// An API key selects the live provider; without one the deterministic
/// offline fallback is used. Resolved once per process — never per call.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn EmbeddingProvider> {
    match &config.api_key {
        Some(api_key) => {
            tracing::info!(model = %config.model, "using remote embedding provider");
            Box::new(remote::RemoteEmbedder::new(
                api_key.clone(),
                config.base_url.clone(),
                config.model.clone(),
                config.dimensions,
            ))
        }
        None => {
            tracing::info!("no API key configured, using offline fallback embedder");
            Box::new(fallback::FallbackEmbedder::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_api_key_selects_fallback() {
        let config = EmbeddingConfig::default();
        let provider = create_provider(&config);
        assert_eq!(provider.dimensions(), fallback::FALLBACK_DIM);
        assert!(provider.identity().starts_with("fallback"));
    }

    #[test]
    fn api_key_selects_remote() {
        let config = EmbeddingConfig {
            api_key: Some("sk-test".into()),
            ..EmbeddingConfig::default()
        };
        let provider = create_provider(&config);
        assert_eq!(provider.dimensions(), 3072);
        assert!(provider.identity().contains("text-embedding-3-large"));
    }
}
