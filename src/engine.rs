//! Memory engine orchestration.
//!
//! [`MemoryEngine`] wires an injected [`ChunkStore`] and
//! [`EmbeddingProvider`] into the two inbound operations the surrounding
//! application calls: [`persist_memory`](MemoryEngine::persist_memory) after
//! a chat message is durably stored, and
//! [`retrieve_context`](MemoryEngine::retrieve_context) before an assistant
//! response is generated. Both collaborators are chosen once at startup and
//! passed in; the engine holds no hidden global state.

use std::sync::Arc;

use crate::chunker::chunk_text;
use crate::config::MnemaConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::retrieval::{self, RankingParams, RetrievedContext};
use crate::store::{ChunkStore, MemoryChunk};

/// The semantic memory engine: chunk → embed → append on the write path,
/// embed → rank on the read path.
pub struct MemoryEngine {
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn EmbeddingProvider>,
    chunk_size: usize,
    ranking: RankingParams,
    default_limit: usize,
    max_limit: usize,
}

impl MemoryEngine {
    pub fn new(
        store: Arc<dyn ChunkStore>,
        provider: Arc<dyn EmbeddingProvider>,
        config: &MnemaConfig,
    ) -> Self {
        Self {
            store,
            provider,
            chunk_size: config.chunking.chunk_size,
            ranking: RankingParams::from_config(&config.retrieval),
            default_limit: config.retrieval.default_limit,
            max_limit: config.retrieval.max_limit,
        }
    }

    /// Persist one message's content into memory: chunk, embed every chunk,
    /// then append each chunk tagged with the source message ID.
    ///
    /// Embedding runs strictly before any append, so a chunk either reaches
    /// the store with its embedding or not at all — an embedding failure
    /// aborts the whole persist and nothing partial is written.
    pub fn persist_memory(
        &self,
        user_id: &str,
        session_id: &str,
        message_id: &str,
        content: &str,
    ) -> Result<Vec<MemoryChunk>> {
        let chunks = chunk_text(content, self.chunk_size);
        if chunks.is_empty() {
            tracing::debug!(user = user_id, message = message_id, "no chunks to persist");
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.as_str()).collect();
        let embeddings = self.provider.embed_batch(&texts)?;

        let message_ids = vec![message_id.to_string()];
        let mut stored = Vec::with_capacity(chunks.len());
        for (text, embedding) in chunks.iter().zip(embeddings.iter()) {
            stored.push(self.store.append(
                user_id,
                session_id,
                text,
                &message_ids,
                embedding,
                None,
            )?);
        }

        tracing::debug!(
            user = user_id,
            message = message_id,
            chunks = stored.len(),
            "persisted memory chunks"
        );
        Ok(stored)
    }

    /// Answer a query with the most relevant prior chunks for `user_id`.
    ///
    /// `limit` defaults to the configured value and is capped at the
    /// configured ceiling.
    pub fn retrieve_context(
        &self,
        user_id: &str,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RetrievedContext>> {
        let limit = limit.unwrap_or(self.default_limit).min(self.max_limit);
        let query_embedding = self.provider.embed(query)?;
        retrieval::retrieve(&*self.store, user_id, &query_embedding, limit, self.ranking)
    }

    /// Cascade-delete all chunks from a session. Returns the number removed.
    pub fn forget_session(&self, session_id: &str) -> Result<usize> {
        let removed = self.store.delete_by_session(session_id)?;
        tracing::debug!(session = session_id, removed, "forgot session chunks");
        Ok(removed)
    }
}
