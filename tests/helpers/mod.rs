#![allow(dead_code)]

use std::sync::Arc;

use mnema::config::MnemaConfig;
use mnema::db;
use mnema::embedding::fallback::FallbackEmbedder;
use mnema::engine::MemoryEngine;
use mnema::store::memory::InMemoryChunkStore;
use mnema::store::sqlite::SqliteChunkStore;
use mnema::store::ChunkStore;

/// Open a fresh in-memory SQLite store with schema and migrations applied.
pub fn sqlite_store() -> SqliteChunkStore {
    SqliteChunkStore::new(db::open_memory_database().unwrap())
}

/// Build an engine over the given store with the fallback embedder and
/// default config.
pub fn engine_over(store: Arc<dyn ChunkStore>) -> MemoryEngine {
    MemoryEngine::new(store, Arc::new(FallbackEmbedder::new()), &MnemaConfig::default())
}

/// Build an engine over a fresh in-memory store.
pub fn memory_engine() -> MemoryEngine {
    engine_over(Arc::new(InMemoryChunkStore::new()))
}

/// Generate a deterministic embedding with a spike at position `seed`.
/// Each seed produces a distinct, orthogonal vector.
pub fn test_embedding(seed: usize, dim: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; dim];
    v[seed % dim] = 1.0;
    v
}

/// Message ID list helper.
pub fn msg_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
