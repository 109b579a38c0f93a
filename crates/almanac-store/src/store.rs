use std::path::Path;

use rusqlite::{Connection, params};

use almanac_core::{
    CalendarDate, HistoryEntry, LedgerSnapshot, PreferenceStore, Preferences, SNAPSHOT_VERSION,
};

use crate::error::{Result, StoreError};
use crate::schema;

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).ok();
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        set_metadata_on(&self.conn, key, value)
    }

    // --- Save ---

    /// Replace the stored ledger and preferences in one transaction.
    pub fn save_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute_batch("DELETE FROM history; DELETE FROM preferences;")?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO history (position, anchor_date, last_used, use_count, is_default)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, entry) in snapshot.entries.iter().enumerate() {
                insert.execute(params![
                    position as i64,
                    entry.anchor_date.to_string(),
                    entry.last_used,
                    entry.use_count,
                    entry.is_default as i32,
                ])?;
            }
        }

        let prefs = &snapshot.preferences;
        for (key, value) in [
            ("theme", prefs.theme.clone()),
            ("language", prefs.language.clone()),
            ("show_tips", prefs.show_tips.to_string()),
        ] {
            tx.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }

        set_metadata_on(&tx, "history_cap", &snapshot.cap.to_string())?;
        set_metadata_on(&tx, "default_anchor", &snapshot.default_anchor.to_string())?;
        set_metadata_on(&tx, "saved_at", &snapshot.exported_at)?;

        tx.commit()?;
        Ok(())
    }

    // --- Load ---

    /// `None` when nothing has been saved yet.
    pub fn load_snapshot(&self) -> Result<Option<LedgerSnapshot>> {
        let Some(cap) = self.get_metadata("history_cap")? else {
            return Ok(None);
        };
        let cap: usize = cap
            .parse()
            .map_err(|_| StoreError::InvalidData(format!("history_cap '{cap}'")))?;
        let default_anchor = match self.get_metadata("default_anchor")? {
            Some(s) => parse_stored_date(&s)?,
            None => return Err(StoreError::InvalidData("missing default_anchor".into())),
        };
        let saved_at = self.get_metadata("saved_at")?.unwrap_or_default();

        Ok(Some(LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: saved_at,
            cap,
            default_anchor,
            entries: self.load_entries()?,
            preferences: self.load_preferences()?,
        }))
    }

    fn load_entries(&self) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT anchor_date, last_used, use_count, is_default FROM history ORDER BY position",
        )?;
        let rows: Vec<(String, String, u32, bool)> = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(date, last_used, use_count, is_default)| {
                Ok(HistoryEntry {
                    anchor_date: parse_stored_date(&date)?,
                    last_used,
                    use_count,
                    is_default,
                })
            })
            .collect()
    }

    fn load_preferences(&self) -> Result<Preferences> {
        let mut prefs = Preferences::default();
        let mut stmt = self.conn.prepare("SELECT key, value FROM preferences")?;
        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<_, _>>()?;
        for (key, value) in rows {
            match key.as_str() {
                "theme" => prefs.theme = value,
                "language" => prefs.language = value,
                "show_tips" => prefs.show_tips = value == "true",
                other => tracing::debug!(key = other, "ignoring unknown preference"),
            }
        }
        Ok(prefs)
    }
}

fn set_metadata_on(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

fn parse_stored_date(s: &str) -> Result<CalendarDate> {
    CalendarDate::parse(s).map_err(|e| StoreError::InvalidData(format!("stored date: {e}")))
}

impl PreferenceStore for Store {
    fn load(&self) -> almanac_core::Result<Option<LedgerSnapshot>> {
        Ok(self.load_snapshot()?)
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> almanac_core::Result<()> {
        Ok(self.save_snapshot(snapshot)?)
    }

    fn is_ready(&self) -> bool {
        self.conn
            .query_row("SELECT 1 FROM metadata LIMIT 1", [], |_| Ok(()))
            .is_ok()
    }
}
