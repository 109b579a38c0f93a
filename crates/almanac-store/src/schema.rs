use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Version written to `metadata.schema_version` by [`initialize`].
///
/// v1: `metadata`, `history` (ordered by `position`, one row per anchor)
/// and `preferences` as flat key/value rows.
pub const SCHEMA_VERSION: i64 = 1;

/// Open-time setup: connection pragmas, the version gate, then the tables.
///
/// Safe to run on every open. Each step is idempotent, so a fresh file and
/// an existing v1 database end in the same state.
pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    // Checkpoint every ~400KB instead of the default ~4MB
    conn.pragma_update(None, "wal_autocheckpoint", 100)?;

    // Fold any stale WAL left by a crashed process into the main file.
    // In-memory and fresh databases legitimately fail this.
    if conn
        .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
        .is_ok()
    {
        tracing::debug!("startup WAL checkpoint complete");
    }

    check_version(conn)?;
    create_tables(conn)?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Refuse a database written by a newer build.
///
/// Opening it would overwrite `schema_version` with an older number and the
/// next save would drop columns this build does not know about. Databases
/// with no version yet (fresh files) pass.
fn check_version(conn: &Connection) -> Result<()> {
    let has_metadata = conn
        .prepare("SELECT value FROM metadata LIMIT 0")
        .is_ok();
    if !has_metadata {
        return Ok(());
    }
    match get_schema_version(conn)? {
        Some(found) if found > SCHEMA_VERSION => Err(StoreError::InvalidData(format!(
            "schema version {found} is newer than supported {SCHEMA_VERSION}"
        ))),
        Some(found) => {
            tracing::debug!(found, current = SCHEMA_VERSION, "schema version ok");
            Ok(())
        }
        None => Ok(()),
    }
}

/// v1 tables. `CREATE TABLE IF NOT EXISTS` makes this a no-op on an
/// existing database; later versions add their `ALTER TABLE` steps after it.
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS history (
            position    INTEGER PRIMARY KEY,
            anchor_date TEXT NOT NULL UNIQUE,
            last_used   TEXT NOT NULL DEFAULT '',
            use_count   INTEGER NOT NULL DEFAULT 0,
            is_default  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS preferences (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// The stored schema version, `None` before the first [`initialize`].
/// An unparsable value reads as 0.
pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}
