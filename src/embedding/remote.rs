//! Live embedding provider for OpenAI-compatible APIs.
//!
//! Posts to `{base_url}/embeddings` with bearer auth. Any HTTP, auth, or
//! response-shape failure propagates as [`MnemaError::Embedding`] — once
//! live mode is selected there is no silent fallback to the offline
//! embedder, because the two embedding spaces are not comparable.

use crate::error::{MnemaError, Result};

use super::EmbeddingProvider;

/// Remote embedding client. Works against OpenAI, Azure OpenAI, OpenRouter,
/// and other OpenAI-compatible endpoints.
pub struct RemoteEmbedder {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl RemoteEmbedder {
    pub fn new(api_key: String, base_url: String, model: String, dimensions: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
            model,
            dimensions,
        }
    }

    /// Async embedding call for a batch of inputs.
    ///
    /// Each call is an independently cancellable unit of work — dropping the
    /// future abandons the request at the HTTP boundary and nothing is
    /// persisted by this layer.
    pub async fn embed_batch_async(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let url = format!("{}/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "input": texts,
                "model": self.model,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MnemaError::Embedding(format!(
                "embedding API error {status}: {body}"
            )));
        }

        let data: serde_json::Value = response.json().await?;
        let items = data["data"]
            .as_array()
            .ok_or_else(|| MnemaError::Embedding("invalid response format".into()))?;

        let embeddings: Vec<Vec<f32>> = items
            .iter()
            .map(|item| {
                item["embedding"]
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|v| v.as_f64().map(|f| f as f32))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        if embeddings.len() != texts.len() {
            return Err(MnemaError::Embedding(format!(
                "embedding API returned {} vectors for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }

        if let Some(first) = embeddings.first() {
            if first.len() != self.dimensions {
                return Err(MnemaError::Embedding(format!(
                    "embedding dimensions mismatch: expected {}, got {}",
                    self.dimensions,
                    first.len()
                )));
            }
        }

        Ok(embeddings)
    }

    /// Async embedding call for a single input.
    pub async fn embed_async(&self, text: &str) -> Result<Vec<f32>> {
        let mut results = self.embed_batch_async(&[text]).await?;
        results
            .pop()
            .ok_or_else(|| MnemaError::Embedding("embedding API returned no vectors".into()))
    }
}

impl EmbeddingProvider for RemoteEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        // Blocking bridge for the sync interface. Requires a multi-thread
        // tokio runtime.
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.embed_async(text))
        })
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(self.embed_batch_async(texts))
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn identity(&self) -> String {
        format!("remote-{}-{}", self.model, self.dimensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_names_the_model_and_dimensions() {
        let embedder = RemoteEmbedder::new(
            "sk-test".into(),
            "https://api.openai.com/v1".into(),
            "text-embedding-3-large".into(),
            3072,
        );
        assert_eq!(embedder.identity(), "remote-text-embedding-3-large-3072");
        assert_eq!(embedder.dimensions(), 3072);
    }
}
