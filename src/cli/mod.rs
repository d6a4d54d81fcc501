pub mod forget;
pub mod recall;
pub mod remember;
pub mod stats;

use std::sync::Arc;

use anyhow::Result;

use crate::config::MnemaConfig;
use crate::engine::MemoryEngine;
use crate::store::sqlite::SqliteChunkStore;
use crate::store::ChunkStore;

/// Open the durable store and build an engine over it.
///
/// Returns the store alongside the engine so commands that need direct
/// store access (stats) can reuse the same connection.
pub fn build_engine(config: &MnemaConfig) -> Result<(MemoryEngine, Arc<SqliteChunkStore>)> {
    let db_path = config.resolved_db_path();
    let conn = crate::db::open_database(&db_path)?;

    let provider = crate::embedding::create_provider(&config.embedding);
    crate::db::migrations::check_embedding_provider(&conn, &provider.identity())?;

    let store = Arc::new(SqliteChunkStore::new(conn));
    let engine = MemoryEngine::new(
        Arc::clone(&store) as Arc<dyn ChunkStore>,
        Arc::from(provider),
        config,
    );
    Ok((engine, store))
}
