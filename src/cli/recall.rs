use anyhow::Result;

use crate::config::MnemaConfig;

/// Run a ranked context query from the terminal.
pub fn recall(config: &MnemaConfig, user: &str, query: &str, limit: Option<usize>) -> Result<()> {
    let (engine, _store) = super::build_engine(config)?;

    let results = engine.retrieve_context(user, query, limit)?;
    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", results.len());
    for (i, result) in results.iter().enumerate() {
        let preview = if result.chunk.text_chunk.chars().count() > 120 {
            let cut: String = result.chunk.text_chunk.chars().take(120).collect();
            format!("{cut}...")
        } else {
            result.chunk.text_chunk.clone()
        };

        println!(
            "  {}. {} (score: {:.4}, similarity: {:.4}, recency: {:.2})",
            i + 1,
            result.chunk.id,
            result.score,
            result.similarity,
            result.recency,
        );
        println!("     {preview}");
        println!();
    }

    Ok(())
}
