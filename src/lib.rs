//! Conversational semantic memory for chat assistants.
//!
//! mnema turns a stream of chat messages into persisted, retrievable memory
//! chunks and answers a query with the most relevant prior chunks, ranked by
//! a blend of cosine similarity and recency decay. The write path is
//! chunk → embed → append; the read path is embed → full-scan rank →
//! truncate. Chunks are write-once and tenant-scoped: retrieval never
//! crosses a user boundary.
//!
//! # Architecture
//!
//! - **Storage**: SQLite (durable) or an injectable in-memory store, both
//!   behind the same [`store::ChunkStore`] trait with identical ranking
//!   semantics
//! - **Embeddings**: OpenAI-compatible remote API, or a deterministic
//!   offline fallback when no API key is configured
//! - **Ranking**: `similarity * 0.8 + recency * 0.2` by default, with a
//!   30-day linear decay window — all configurable
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`chunker`] — Whitespace normalization and fixed-size text chunking
//! - [`db`] — SQLite database initialization, schema, and migrations
//! - [`embedding`] — Text-to-vector providers and provider selection
//! - [`store`] — Append-only chunk persistence (SQLite and in-memory)
//! - [`retrieval`] — Cosine + recency scoring and top-K ranking
//! - [`engine`] — The persist/retrieve orchestration the application calls
//! - [`error`] — Typed error kinds surfaced to the orchestration layer

pub mod chunker;
pub mod config;
pub mod db;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod retrieval;
pub mod store;
