use anyhow::Result;

use crate::config::MnemaConfig;

/// Print store statistics.
pub fn stats(config: &MnemaConfig) -> Result<()> {
    let (_engine, store) = super::build_engine(config)?;

    let stats = store.stats()?;
    println!("Memory store statistics");
    println!("  chunks:   {}", stats.total_chunks);
    println!("  users:    {}", stats.distinct_users);
    println!("  sessions: {}", stats.distinct_sessions);
    if let Some(oldest) = stats.oldest_created_at {
        println!("  oldest:   {}", oldest.to_rfc3339());
    }
    if let Some(newest) = stats.newest_created_at {
        println!("  newest:   {}", newest.to_rfc3339());
    }

    Ok(())
}
