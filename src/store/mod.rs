//! Durable memory-chunk storage.
//!
//! Defines [`MemoryChunk`] (a write-once record), the [`ChunkStore`] trait,
//! and two backends: [`sqlite::SqliteChunkStore`] for durable deployments
//! and [`memory::InMemoryChunkStore`] for local development and tests. Both
//! rank identically downstream — the ranker owns all scoring, so tests pass
//! against either backend interchangeably.

pub mod memory;
pub mod sqlite;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Provenance metadata carried from the source messages into a chunk.
///
/// Known fields are enumerated; anything else the messaging layer attaches
/// goes into the typed extension map instead of an opaque blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Role of the authoring message (e.g. `"user"`, `"assistant"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Client identifier the message arrived from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Open extension map for fields this crate does not interpret.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ChunkMetadata {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.client.is_none() && self.extra.is_empty()
    }
}

/// A persisted memory chunk. Created once when a message is chunked and
/// embedded, never mutated, deleted only when the owning session is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryChunk {
    /// UUID v7 (time-sortable), assigned at append, immutable.
    pub id: String,
    /// Owning identity. All reads are scoped to exactly one user's chunks.
    pub user_id: String,
    /// Conversation the chunk originated from. Informational except for
    /// cascade delete — retrieval is never scoped by session.
    pub session_id: String,
    /// Source message identifiers whose content produced this chunk. Always
    /// at least one.
    pub message_ids: Vec<String>,
    /// Normalized text segment, at most the configured chunk size in chars.
    pub text_chunk: String,
    /// Provider-defined fixed-length vector.
    pub embedding: Vec<f32>,
    /// Optional provenance metadata from the source messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChunkMetadata>,
    /// Creation timestamp, drives recency scoring.
    pub created_at: DateTime<Utc>,
}

/// Append-only chunk storage, scoped by user and session.
///
/// No update operation exists: chunks are write-once, and concurrent
/// appends are order-independent.
pub trait ChunkStore: Send + Sync {
    /// Assign a new id and creation timestamp, persist, and return the
    /// stored record. Never overwrites.
    fn append(
        &self,
        user_id: &str,
        session_id: &str,
        text_chunk: &str,
        message_ids: &[String],
        embedding: &[f32],
        metadata: Option<&ChunkMetadata>,
    ) -> Result<MemoryChunk>;

    /// All chunks owned by `user_id`, in implementation-defined order.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<MemoryChunk>>;

    /// Cascade removal of a session's chunks. Returns the number removed.
    fn delete_by_session(&self, session_id: &str) -> Result<usize>;
}

/// View an f32 embedding slice as raw bytes for BLOB storage.
pub fn embedding_to_bytes(embedding: &[f32]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            embedding.as_ptr() as *const u8,
            embedding.len() * std::mem::size_of::<f32>(),
        )
    }
}

/// Decode a stored BLOB back into an f32 embedding. Trailing bytes that do
/// not form a whole f32 are ignored.
pub fn embedding_from_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(std::mem::size_of::<f32>())
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}
