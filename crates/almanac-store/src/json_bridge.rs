use std::fs;
use std::path::Path;

use almanac_core::{LedgerSnapshot, export_json, import_json};

use crate::error::{Result, StoreError};

/// Read a snapshot file in either the current or the legacy
/// `user_config.json` layout.
pub fn read_snapshot_file(path: &Path) -> Result<LedgerSnapshot> {
    let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let snapshot = import_json(&json)?;
    tracing::info!(
        path = %path.display(),
        entries = snapshot.entries.len(),
        "read history snapshot"
    );
    Ok(snapshot)
}

pub fn write_snapshot_file(path: &Path, snapshot: &LedgerSnapshot) -> Result<()> {
    let json = export_json(snapshot)?;
    fs::write(path, json).map_err(|e| StoreError::io(path, e))
}
