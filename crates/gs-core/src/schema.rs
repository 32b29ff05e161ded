use crate::error::Result;

/// Version string recorded in every `rule_cache` row so that readers can
/// detect a cache written by an older build.
pub const SCHEMA_VERSION: &str = "1.0.0";

// ---------------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------------

/// Full DDL for the rule cache.
///
/// Uses `CREATE TABLE IF NOT EXISTS` so that `run_migrations` is idempotent.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS rule_cache (
    cache_key       TEXT    NOT NULL PRIMARY KEY,
    schema_version  TEXT    NOT NULL,
    fingerprint     TEXT    NOT NULL,
    rule_count      INTEGER NOT NULL,
    payload         TEXT    NOT NULL,
    created_at      TEXT    NOT NULL
);
";

/// Apply the schema to `conn`.
pub fn run_migrations(conn: &rusqlite::Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}
