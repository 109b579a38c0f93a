use crate::error::{EngineError, Result};
use crate::snapshot::LedgerSnapshot;

/// Where the engine keeps the history ledger between runs.
///
/// `save` is called synchronously after every ledger mutation. A failure is
/// reported to the caller; the in-memory ledger is never rolled back.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>>;
    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()>;
    fn is_ready(&self) -> bool;
}

/// Keeps the last snapshot in memory. An offline store reports not-ready and
/// rejects saves.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    snapshot: Option<LedgerSnapshot>,
    offline: bool,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> Option<&LedgerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PreferenceStore for InMemoryStore {
    fn load(&self) -> Result<Option<LedgerSnapshot>> {
        if self.offline {
            return Err(EngineError::PersistenceUnavailable("store offline".to_string()));
        }
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        if self.offline {
            return Err(EngineError::PersistenceUnavailable("store offline".to_string()));
        }
        self.snapshot = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        !self.offline
    }
}
