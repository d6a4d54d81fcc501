//! In-memory chunk store for local development and tests.
//!
//! An explicitly constructed, injectable instance, not a module-level
//! singleton. Ranking semantics are identical to the durable backend
//! because scoring lives entirely in the ranker.

#![allow(dead_code)]

use std::sync::RwLock;

use chrono::Utc;

use crate::error::{MnemaError, Result};

use super::{ChunkMetadata, ChunkStore, MemoryChunk};

/// Append-only in-memory chunk store.
#[derive(Debug, Default)]
pub struct InMemoryChunkStore {
    chunks: RwLock<Vec<MemoryChunk>>,
}

impl InMemoryChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored chunks across all users.
    pub fn len(&self) -> usize {
        self.chunks.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChunkStore for InMemoryChunkStore {
    fn append(
        &self,
        user_id: &str,
        session_id: &str,
        text_chunk: &str,
        message_ids: &[String],
        embedding: &[f32],
        metadata: Option<&ChunkMetadata>,
    ) -> Result<MemoryChunk> {
        let chunk = MemoryChunk {
            id: uuid::Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            message_ids: message_ids.to_vec(),
            text_chunk: text_chunk.to_string(),
            embedding: embedding.to_vec(),
            metadata: metadata.cloned(),
            created_at: Utc::now(),
        };

        let mut chunks = self
            .chunks
            .write()
            .map_err(|e| MnemaError::Store(format!("store lock poisoned: {e}")))?;
        chunks.push(chunk.clone());
        Ok(chunk)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<MemoryChunk>> {
        let chunks = self
            .chunks
            .read()
            .map_err(|e| MnemaError::Store(format!("store lock poisoned: {e}")))?;
        Ok(chunks
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete_by_session(&self, session_id: &str) -> Result<usize> {
        let mut chunks = self
            .chunks
            .write()
            .map_err(|e| MnemaError::Store(format!("store lock poisoned: {e}")))?;
        let before = chunks.len();
        chunks.retain(|c| c.session_id != session_id);
        Ok(before - chunks.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg_ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn append_then_list_sees_the_chunk_exactly_once() {
        let store = InMemoryChunkStore::new();
        let chunk = store
            .append("alice", "s1", "hello", &msg_ids(&["m1"]), &[1.0, 0.0], None)
            .unwrap();

        let listed = store.list_by_user("alice").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, chunk.id);
    }

    #[test]
    fn separate_instances_do_not_share_state() {
        let a = InMemoryChunkStore::new();
        let b = InMemoryChunkStore::new();
        a.append("alice", "s1", "only in a", &msg_ids(&["m1"]), &[1.0], None)
            .unwrap();

        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert!(b.list_by_user("alice").unwrap().is_empty());
    }

    #[test]
    fn delete_by_session_removes_across_users() {
        let store = InMemoryChunkStore::new();
        store
            .append("alice", "shared", "a", &msg_ids(&["m1"]), &[1.0], None)
            .unwrap();
        store
            .append("bob", "shared", "b", &msg_ids(&["m2"]), &[1.0], None)
            .unwrap();
        store
            .append("alice", "other", "c", &msg_ids(&["m3"]), &[1.0], None)
            .unwrap();

        assert_eq!(store.delete_by_session("shared").unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_by_user("alice").unwrap().len(), 1);
        assert!(store.list_by_user("bob").unwrap().is_empty());
    }

    #[test]
    fn ids_are_unique_across_appends() {
        let store = InMemoryChunkStore::new();
        let a = store
            .append("alice", "s1", "one", &msg_ids(&["m1"]), &[1.0], None)
            .unwrap();
        let b = store
            .append("alice", "s1", "two", &msg_ids(&["m1"]), &[1.0], None)
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn concurrent_appends_are_all_visible() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryChunkStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store
                    .append(
                        "alice",
                        "s1",
                        &format!("chunk {i}"),
                        &[format!("m{i}")],
                        &[i as f32],
                        None,
                    )
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.list_by_user("alice").unwrap().len(), 8);
    }
}
