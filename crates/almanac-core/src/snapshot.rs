//! JSON snapshot of the history ledger and user preferences.
//!
//! Two layouts are accepted on import: the current versioned snapshot and the
//! older `user_config.json` layout (`biorhythm_history` entries with
//! `birth_date`, `last_used`, `usage_count` and `is_default`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_ANCHOR, DEFAULT_HISTORY_CAP};
use crate::date::CalendarDate;
use crate::error::{EngineError, Result};
use crate::history::{HistoryEntry, HistoryLedger};
use crate::time::now_iso8601;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: String,
    pub language: String,
    pub show_tips: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "auto".to_string(),
            language: "en".to_string(),
            show_tips: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u32,
    pub exported_at: String,
    pub cap: usize,
    pub default_anchor: CalendarDate,
    /// Most recent first.
    pub entries: Vec<HistoryEntry>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &HistoryLedger, preferences: &Preferences) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            exported_at: now_iso8601(),
            cap: ledger.cap(),
            default_anchor: ledger.default_anchor(),
            entries: ledger.entries().cloned().collect(),
            preferences: preferences.clone(),
        }
    }

    /// Rebuild a ledger under the caller's cap and default anchor.
    pub fn to_ledger(&self, cap: usize, default_anchor: CalendarDate) -> Result<HistoryLedger> {
        HistoryLedger::from_entries(self.entries.clone(), cap, default_anchor)
    }
}

// --- Legacy layout ---

#[derive(Deserialize)]
struct LegacyConfig {
    biorhythm_history: Vec<LegacyEntry>,
    #[serde(default = "default_cap")]
    max_history_items: usize,
    #[serde(default)]
    preferences: Preferences,
}

fn default_cap() -> usize {
    DEFAULT_HISTORY_CAP
}

#[derive(Deserialize)]
struct LegacyEntry {
    birth_date: String,
    #[serde(default)]
    last_used: String,
    #[serde(default)]
    usage_count: u32,
    #[serde(default)]
    is_default: bool,
}

impl LegacyConfig {
    fn into_snapshot(self) -> Result<LedgerSnapshot> {
        let mut entries = Vec::with_capacity(self.biorhythm_history.len());
        for e in self.biorhythm_history {
            entries.push(HistoryEntry {
                anchor_date: CalendarDate::parse(&e.birth_date)?,
                last_used: e.last_used,
                use_count: e.usage_count,
                is_default: e.is_default,
            });
        }
        let (y, m, d) = DEFAULT_ANCHOR;
        let default_anchor = match entries.iter().find(|e| e.is_default) {
            Some(e) => e.anchor_date,
            None => CalendarDate::new(y, m, d)?,
        };
        Ok(LedgerSnapshot {
            version: SNAPSHOT_VERSION,
            exported_at: now_iso8601(),
            cap: self.max_history_items,
            default_anchor,
            entries,
            preferences: self.preferences,
        })
    }
}

pub fn export_json(snapshot: &LedgerSnapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| EngineError::PersistenceUnavailable(format!("snapshot encode: {e}")))
}

/// Parse either layout.
pub fn import_json(json: &str) -> Result<LedgerSnapshot> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| EngineError::PersistenceUnavailable(format!("snapshot parse: {e}")))?;

    if value.get("biorhythm_history").is_some() {
        debug!("importing legacy user_config layout");
        let legacy: LegacyConfig = serde_json::from_value(value)
            .map_err(|e| EngineError::PersistenceUnavailable(format!("legacy snapshot: {e}")))?;
        return legacy.into_snapshot();
    }

    let snapshot: LedgerSnapshot = serde_json::from_value(value)
        .map_err(|e| EngineError::PersistenceUnavailable(format!("snapshot decode: {e}")))?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(EngineError::PersistenceUnavailable(format!(
            "snapshot version {} is newer than supported {SNAPSHOT_VERSION}",
            snapshot.version
        )));
    }
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_export_import_preserves_order() {
        let mut ledger = HistoryLedger::new(6, date("1991-01-01")).unwrap();
        ledger.record_at(date("2000-02-02"), "2025-01-01T00:00:00Z".into());
        ledger.record_at(date("1985-05-05"), "2025-01-02T00:00:00Z".into());

        let json = export_json(&LedgerSnapshot::capture(&ledger, &Preferences::default())).unwrap();
        let back = import_json(&json).unwrap();
        let restored = back.to_ledger(6, date("1991-01-01")).unwrap();
        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_import_legacy_layout() {
        let json = r#"{
            "version": "1.0.0",
            "last_updated": "2025-09-01T08:00:00.000Z",
            "biorhythm_history": [
                {"birth_date": "1990-06-15", "last_used": "2025-09-01T08:00:00.000Z", "usage_count": 4, "is_default": false},
                {"birth_date": "1991-01-01", "last_used": "2025-08-01T08:00:00.000Z", "usage_count": 0, "is_default": true}
            ],
            "max_history_items": 6,
            "preferences": {"theme": "dark", "language": "zh-CN", "show_tips": false}
        }"#;
        let snap = import_json(json).unwrap();
        assert_eq!(snap.cap, 6);
        assert_eq!(snap.default_anchor, date("1991-01-01"));
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[0].anchor_date, date("1990-06-15"));
        assert_eq!(snap.entries[0].use_count, 4);
        assert_eq!(snap.preferences.theme, "dark");
        assert!(!snap.preferences.show_tips);
    }

    #[test]
    fn test_legacy_bad_date_is_rejected() {
        let json = r#"{"biorhythm_history": [{"birth_date": "1990-13-01"}]}"#;
        assert!(matches!(import_json(json), Err(EngineError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_rejects_garbage_and_future_versions() {
        assert!(matches!(import_json("not json"), Err(EngineError::PersistenceUnavailable(_))));
        let future = r#"{"version": 99, "exported_at": "", "cap": 6,
            "default_anchor": "1991-01-01", "entries": []}"#;
        assert!(import_json(future).is_err());
    }
}
