use anyhow::Result;

use crate::config::MnemaConfig;

/// Persist one message's content into memory from the terminal.
pub fn remember(
    config: &MnemaConfig,
    user: &str,
    session: &str,
    message_id: &str,
    content: &str,
) -> Result<()> {
    let (engine, _store) = super::build_engine(config)?;

    let stored = engine.persist_memory(user, session, message_id, content)?;
    if stored.is_empty() {
        println!("Nothing to remember (empty content).");
        return Ok(());
    }

    println!("Stored {} chunk(s) for user {user}:", stored.len());
    for chunk in &stored {
        println!("  {} ({} chars)", chunk.id, chunk.text_chunk.chars().count());
    }

    Ok(())
}
