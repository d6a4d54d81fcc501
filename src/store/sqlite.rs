//! SQLite-backed chunk store.
//!
//! The write path inserts one row per chunk with the embedding as a raw f32
//! BLOB and the source message IDs as a JSON array. The connection sits
//! behind a mutex: chunks are immutable once written, so reads need no
//! coordination beyond the connection itself.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::{MnemaError, Result};

use super::{embedding_from_bytes, embedding_to_bytes, ChunkMetadata, ChunkStore, MemoryChunk};

/// Durable chunk store over a SQLite connection.
pub struct SqliteChunkStore {
    conn: Mutex<Connection>,
}

/// Aggregate counters for the `stats` CLI surface.
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub total_chunks: usize,
    pub distinct_users: usize,
    pub distinct_sessions: usize,
    pub oldest_created_at: Option<DateTime<Utc>>,
    pub newest_created_at: Option<DateTime<Utc>>,
}

impl SqliteChunkStore {
    /// Wrap an already-opened connection (see [`crate::db::open_database`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| MnemaError::Store(format!("connection lock poisoned: {e}")))
    }

    /// Aggregate statistics over all stored chunks.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;
        let (total_chunks, distinct_users, distinct_sessions): (i64, i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT user_id), COUNT(DISTINCT session_id) \
                 FROM memory_chunks",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        let (oldest, newest): (Option<String>, Option<String>) = conn.query_row(
            "SELECT MIN(created_at), MAX(created_at) FROM memory_chunks",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(StoreStats {
            total_chunks: total_chunks as usize,
            distinct_users: distinct_users as usize,
            distinct_sessions: distinct_sessions as usize,
            oldest_created_at: oldest.as_deref().and_then(parse_timestamp),
            newest_created_at: newest.as_deref().and_then(parse_timestamp),
        })
    }
}

impl ChunkStore for SqliteChunkStore {
    fn append(
        &self,
        user_id: &str,
        session_id: &str,
        text_chunk: &str,
        message_ids: &[String],
        embedding: &[f32],
        metadata: Option<&ChunkMetadata>,
    ) -> Result<MemoryChunk> {
        let id = uuid::Uuid::now_v7().to_string();
        let created_at = Utc::now();
        let message_ids_json = serde_json::to_string(message_ids)
            .map_err(|e| MnemaError::Store(format!("failed to encode message ids: {e}")))?;
        let metadata_json = metadata
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| MnemaError::Store(format!("failed to encode metadata: {e}")))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO memory_chunks (id, user_id, session_id, message_ids, text_chunk, embedding, metadata, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                user_id,
                session_id,
                message_ids_json,
                text_chunk,
                embedding_to_bytes(embedding),
                metadata_json,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(MemoryChunk {
            id,
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            message_ids: message_ids.to_vec(),
            text_chunk: text_chunk.to_string(),
            embedding: embedding.to_vec(),
            metadata: metadata.cloned(),
            created_at,
        })
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<MemoryChunk>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, session_id, message_ids, text_chunk, embedding, metadata, created_at \
             FROM memory_chunks WHERE user_id = ?1",
        )?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                let message_ids_json: String = row.get(3)?;
                let embedding_bytes: Vec<u8> = row.get(5)?;
                let metadata_json: Option<String> = row.get(6)?;
                let created_at: String = row.get(7)?;
                Ok(RawChunkRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    session_id: row.get(2)?,
                    message_ids_json,
                    text_chunk: row.get(4)?,
                    embedding_bytes,
                    metadata_json,
                    created_at,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(RawChunkRow::into_chunk).collect()
    }

    fn delete_by_session(&self, session_id: &str) -> Result<usize> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM memory_chunks WHERE session_id = ?1",
            params![session_id],
        )?;
        Ok(removed)
    }
}

/// Row as stored, before JSON/BLOB/timestamp decoding.
struct RawChunkRow {
    id: String,
    user_id: String,
    session_id: String,
    message_ids_json: String,
    text_chunk: String,
    embedding_bytes: Vec<u8>,
    metadata_json: Option<String>,
    created_at: String,
}

impl RawChunkRow {
    fn into_chunk(self) -> Result<MemoryChunk> {
        let message_ids: Vec<String> = serde_json::from_str(&self.message_ids_json)
            .map_err(|e| MnemaError::Store(format!("corrupt message_ids for {}: {e}", self.id)))?;
        let metadata: Option<ChunkMetadata> = self
            .metadata_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| MnemaError::Store(format!("corrupt metadata for {}: {e}", self.id)))?;
        let created_at = parse_timestamp(&self.created_at)
            .ok_or_else(|| MnemaError::Store(format!("corrupt created_at for {}", self.id)))?;

        Ok(MemoryChunk {
            id: self.id,
            user_id: self.user_id,
            session_id: self.session_id,
            message_ids,
            text_chunk: self.text_chunk,
            embedding: embedding_from_bytes(&self.embedding_bytes),
            metadata,
            created_at,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
