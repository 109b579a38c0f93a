//! Data directory, engine settings and content tables.
//!
//! Layout of a data directory:
//!
//! ```text
//! <data_dir>/almanac.db     history ledger (SQLite)
//! <data_dir>/config.toml    optional EngineConfig overrides
//! <data_dir>/content.toml   optional replacement for the built-in content
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs};

use almanac_core::{ContentTables, Engine, EngineConfig};

use crate::error::{Result, StoreError};
use crate::store::Store;

pub const DATA_DIR_ENV: &str = "ALMANAC_DATA_DIR";
pub const DB_FILE: &str = "almanac.db";
pub const CONFIG_FILE: &str = "config.toml";
pub const CONTENT_FILE: &str = "content.toml";

const BUILTIN_CONTENT: &str = include_str!("../content/default.toml");

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// `--data-dir` flag, else `ALMANAC_DATA_DIR`, else `$HOME/.almanac`.
pub fn resolve_data_dir(flag: Option<&Path>) -> PathBuf {
    resolve_from(flag, env::var_os(DATA_DIR_ENV), dirs_home)
}

fn resolve_from(
    flag: Option<&Path>,
    env_value: Option<OsString>,
    home: impl FnOnce() -> PathBuf,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    match env_value {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => home().join(".almanac"),
    }
}

/// Settings from `<dir>/config.toml`; defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<EngineConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
    let config: EngineConfig =
        toml::from_str(&text).map_err(|source| StoreError::Toml { path, source })?;
    config.validate()?;
    Ok(config)
}

/// The content tables shipped with this crate.
pub fn builtin_content() -> Result<ContentTables> {
    toml::from_str(BUILTIN_CONTENT).map_err(|source| StoreError::Toml {
        path: PathBuf::from("<builtin>"),
        source,
    })
}

/// `<dir>/content.toml` when present, else the built-in tables.
pub fn load_content(dir: &Path) -> Result<ContentTables> {
    let path = dir.join(CONTENT_FILE);
    if !path.exists() {
        return builtin_content();
    }
    let text = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
    let content: ContentTables =
        toml::from_str(&text).map_err(|source| StoreError::Toml { path, source })?;
    let missing = content.missing_pools();
    if !missing.is_empty() {
        tracing::warn!(?missing, "custom content tables incomplete");
    }
    Ok(content)
}

/// Create the data directory if needed and assemble an engine over it.
pub fn open_engine(dir: &Path) -> Result<Engine<Store>> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    let config = load_config(dir)?;
    let content = load_content(dir)?;
    let store = Store::open(&dir.join(DB_FILE))?;
    Ok(Engine::new(config, content, store)?)
}
