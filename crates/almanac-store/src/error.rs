use std::path::PathBuf;

use almanac_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Storage failures surface to the engine as soft persistence errors.
impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Engine(inner) => inner,
            other => EngineError::PersistenceUnavailable(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
