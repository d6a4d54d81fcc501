use anyhow::Result;

use crate::config::MnemaConfig;

/// Cascade-delete all chunks from a session.
pub fn forget_session(config: &MnemaConfig, session: &str) -> Result<()> {
    let (engine, _store) = super::build_engine(config)?;

    let removed = engine.forget_session(session)?;
    println!("Removed {removed} chunk(s) from session {session}.");

    Ok(())
}
