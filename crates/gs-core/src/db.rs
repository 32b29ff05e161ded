//! Persistence for synthesized rules.
//!
//! Rule synthesis walks the whole lexical graph, so its output is stored
//! once under a fixed key and read back on every later run.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GsError, Result};
use crate::hash::compute_rules_fingerprint;
use crate::schema::{run_migrations, SCHEMA_VERSION};
use crate::word::RulePair;

// ---------------------------------------------------------------------------
// Pool type alias
// ---------------------------------------------------------------------------

pub type DbPool = Pool<SqliteConnectionManager>;

// ---------------------------------------------------------------------------
// Pool constructors
// ---------------------------------------------------------------------------

/// Open a connection pool backed by a file-based SQLite database.
pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path);

    let pool = Pool::builder()
        .max_size(4)
        .build(manager)
        .map_err(|e| GsError::Internal(e.to_string()))?;

    let conn = pool.get().map_err(|e| GsError::Internal(e.to_string()))?;
    run_migrations(&conn)?;

    Ok(pool)
}

/// Open a single-connection pool backed by an in-memory SQLite database.
///
/// Every SQLite in-memory connection is its own database, so the pool is
/// capped at one connection.
pub fn create_memory_pool() -> Result<DbPool> {
    let manager = SqliteConnectionManager::memory();

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| GsError::Internal(e.to_string()))?;

    let conn = pool.get().map_err(|e| GsError::Internal(e.to_string()))?;
    run_migrations(&conn)?;

    Ok(pool)
}

// ---------------------------------------------------------------------------
// RuleCacheStore trait
// ---------------------------------------------------------------------------

/// Key-value store for flat synthesized rule lists.
///
/// `load` reports a missing key as [`GsError::NotFound`]; every other error
/// means the store itself is unusable.
pub trait RuleCacheStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Vec<RulePair>>;
    fn save(&self, key: &str, pairs: &[RulePair]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// SqliteRuleCache
// ---------------------------------------------------------------------------

pub struct SqliteRuleCache {
    pool: DbPool,
}

impl SqliteRuleCache {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| GsError::Internal(e.to_string()))
    }
}

impl RuleCacheStore for SqliteRuleCache {
    fn load(&self, key: &str) -> Result<Vec<RulePair>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            "SELECT schema_version, fingerprint, payload
               FROM rule_cache
              WHERE cache_key = ?1",
            params![key],
            |row| {
                let schema_version: String = row.get(0)?;
                let fingerprint: String = row.get(1)?;
                let payload: String = row.get(2)?;
                Ok((schema_version, fingerprint, payload))
            },
        );

        match result {
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(GsError::NotFound(format!("rule cache {key}")))
            }
            Err(e) => Err(GsError::Database(e)),
            Ok((schema_version, fingerprint, payload)) => {
                if schema_version != SCHEMA_VERSION {
                    return Err(GsError::Schema(format!(
                        "rule cache {key} has schema {schema_version}, expected {SCHEMA_VERSION}"
                    )));
                }
                let pairs: Vec<RulePair> = serde_json::from_str(&payload)?;
                verify_fingerprint(&pairs, &fingerprint)?;
                debug!(key, rules = pairs.len(), "loaded rule cache row");
                Ok(pairs)
            }
        }
    }

    fn save(&self, key: &str, pairs: &[RulePair]) -> Result<()> {
        let conn = self.conn()?;
        let payload = serde_json::to_string(pairs)?;

        conn.execute(
            "INSERT OR REPLACE INTO rule_cache
                (cache_key, schema_version, fingerprint, rule_count, payload, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                key,
                SCHEMA_VERSION,
                compute_rules_fingerprint(pairs),
                pairs.len() as i64,
                payload,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileRuleCache
// ---------------------------------------------------------------------------

/// One JSON file per key inside a directory.
pub struct JsonFileRuleCache {
    dir: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    schema_version: String,
    fingerprint: String,
    created_at: DateTime<Utc>,
    rules: Vec<RulePair>,
}

impl JsonFileRuleCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RuleCacheStore for JsonFileRuleCache {
    fn load(&self, key: &str) -> Result<Vec<RulePair>> {
        let path = self.path_for(key);
        let content = std::fs::read_to_string(&path)?;
        let file: CacheFile = serde_json::from_str(&content)?;
        if file.schema_version != SCHEMA_VERSION {
            return Err(GsError::Schema(format!(
                "{} written with schema {}, expected {SCHEMA_VERSION}",
                path.display(),
                file.schema_version
            )));
        }
        verify_fingerprint(&file.rules, &file.fingerprint)?;
        Ok(file.rules)
    }

    fn save(&self, key: &str, pairs: &[RulePair]) -> Result<()> {
        ensure_dir(&self.dir)?;
        let file = CacheFile {
            schema_version: SCHEMA_VERSION.to_string(),
            fingerprint: compute_rules_fingerprint(pairs),
            created_at: Utc::now(),
            rules: pairs.to_vec(),
        };
        std::fs::write(self.path_for(key), serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn verify_fingerprint(pairs: &[RulePair], expected: &str) -> Result<()> {
    let actual = compute_rules_fingerprint(pairs);
    if actual != expected {
        return Err(GsError::HashMismatch {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
