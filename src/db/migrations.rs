//! Forward-only schema migration framework.
//!
//! Tracks the schema version in `schema_meta` and runs sequential migrations
//! to bring the database up to [`CURRENT_SCHEMA_VERSION`]. Also records
//! which embedding provider wrote the store: chunks indexed under one
//! provider are not comparable to queries embedded under another, so the
//! engine warns loudly when the configured provider differs from the stored
//! one.

use rusqlite::Connection;

/// The schema version that the current binary expects.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}

/// Update the stored schema version.
#[allow(dead_code)]
fn update_schema_version(conn: &Connection, version: u32) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE schema_meta SET value = ?1 WHERE key = 'schema_version'",
        [version.to_string()],
    )?;
    Ok(())
}

/// Get the stored embedding provider identity, if any.
pub fn get_embedding_provider(conn: &Connection) -> rusqlite::Result<Option<String>> {
    match conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'embedding_provider'",
        [],
        |row| row.get::<_, String>(0),
    ) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Record the embedding provider identity that writes this store.
pub fn set_embedding_provider(conn: &Connection, identity: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_meta (key, value) VALUES ('embedding_provider', ?1)",
        [identity],
    )?;
    Ok(())
}

/// Record the provider identity on first use, warn if it changed since.
pub fn check_embedding_provider(conn: &Connection, identity: &str) -> rusqlite::Result<()> {
    match get_embedding_provider(conn)? {
        None => set_embedding_provider(conn, identity),
        Some(stored) if stored != identity => {
            tracing::warn!(
                stored = %stored,
                configured = %identity,
                "embedding provider changed — stored chunks and new queries are in \
                 different embedding spaces and will not rank meaningfully"
            );
            Ok(())
        }
        Some(_) => Ok(()),
    }
}

/// Run any pending forward-only migrations. Schema version 1 is current, so
/// this is a no-op today; the loop exists so later versions slot in.
pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    let version = get_schema_version(conn)?;
    tracing::debug!(
        schema_version = version,
        target = CURRENT_SCHEMA_VERSION,
        "checking migrations"
    );

    if version > CURRENT_SCHEMA_VERSION {
        tracing::warn!(
            schema_version = version,
            "database schema is newer than this binary"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        crate::db::schema::init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn get_schema_version_returns_1_on_fresh_db() {
        let conn = test_db();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = test_db();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap(); // second call should not error
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn set_and_get_embedding_provider() {
        let conn = test_db();
        assert!(get_embedding_provider(&conn).unwrap().is_none());

        set_embedding_provider(&conn, "fallback-charsum-32").unwrap();
        assert_eq!(
            get_embedding_provider(&conn).unwrap(),
            Some("fallback-charsum-32".to_string())
        );
    }

    #[test]
    fn check_records_provider_on_first_use() {
        let conn = test_db();
        check_embedding_provider(&conn, "remote-text-embedding-3-large-3072").unwrap();
        assert_eq!(
            get_embedding_provider(&conn).unwrap(),
            Some("remote-text-embedding-3-large-3072".to_string())
        );
    }

    #[test]
    fn check_does_not_overwrite_on_mismatch() {
        let conn = test_db();
        check_embedding_provider(&conn, "fallback-charsum-32").unwrap();
        check_embedding_provider(&conn, "remote-text-embedding-3-large-3072").unwrap();
        // Stored identity is preserved; the mismatch only warns
        assert_eq!(
            get_embedding_provider(&conn).unwrap(),
            Some("fallback-charsum-32".to_string())
        );
    }
}
