//! Bounded most-recently-used ledger of anchor dates.
//!
//! The front of the deque is the most recent entry. Recording moves an entry
//! to the front; when the ledger grows past its cap the least recently used
//! non-default entry is evicted. The default entry can be neither evicted nor
//! removed.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::CalendarDate;
use crate::error::{EngineError, Result};
use crate::time::now_iso8601;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub anchor_date: CalendarDate,
    /// ISO-8601 UTC timestamp of the last use.
    pub last_used: String,
    pub use_count: u32,
    #[serde(default)]
    pub is_default: bool,
}

impl HistoryEntry {
    pub fn default_for(anchor_date: CalendarDate, timestamp: String) -> Self {
        Self {
            anchor_date,
            last_used: timestamp,
            use_count: 0,
            is_default: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    cap: usize,
    default_anchor: CalendarDate,
}

impl HistoryLedger {
    /// A fresh ledger holding only the default entry. `cap` must leave room
    /// for at least one non-default entry.
    pub fn new(cap: usize, default_anchor: CalendarDate) -> Result<Self> {
        Self::from_entries(Vec::new(), cap, default_anchor)
    }

    /// Rebuild from persisted entries, most recent first.
    ///
    /// Duplicate dates keep their first occurrence, the default flag follows
    /// `default_anchor`, a missing default entry is recreated at the back and
    /// the list is trimmed to `cap`.
    pub fn from_entries(
        entries: Vec<HistoryEntry>,
        cap: usize,
        default_anchor: CalendarDate,
    ) -> Result<Self> {
        if cap < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "history cap must be at least 2, got {cap}"
            )));
        }
        let mut ledger = Self {
            entries: VecDeque::with_capacity(cap + 1),
            cap,
            default_anchor,
        };
        for mut entry in entries {
            if ledger.position(entry.anchor_date).is_some() {
                continue;
            }
            entry.is_default = entry.anchor_date == default_anchor;
            ledger.entries.push_back(entry);
        }
        if ledger.position(default_anchor).is_none() {
            ledger
                .entries
                .push_back(HistoryEntry::default_for(default_anchor, now_iso8601()));
        }
        ledger.evict_overflow();
        Ok(ledger)
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn default_anchor(&self) -> CalendarDate {
        self.default_anchor
    }

    fn position(&self, date: CalendarDate) -> Option<usize> {
        self.entries.iter().position(|e| e.anchor_date == date)
    }

    /// Record a use of `date` now.
    pub fn record(&mut self, date: CalendarDate) {
        self.record_at(date, now_iso8601());
    }

    /// Record a use of `date` with an explicit timestamp.
    pub fn record_at(&mut self, date: CalendarDate, timestamp: String) {
        match self.position(date).and_then(|i| self.entries.remove(i)) {
            Some(mut entry) => {
                entry.last_used = timestamp;
                entry.use_count = entry.use_count.saturating_add(1);
                self.entries.push_front(entry);
            }
            None => {
                self.entries.push_front(HistoryEntry {
                    anchor_date: date,
                    last_used: timestamp,
                    use_count: 1,
                    is_default: date == self.default_anchor,
                });
            }
        }
        self.evict_overflow();
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.cap {
            let Some(idx) = self.entries.iter().rposition(|e| !e.is_default) else {
                break;
            };
            if let Some(evicted) = self.entries.remove(idx) {
                debug!(date = %evicted.anchor_date, "evicted history entry");
            }
        }
    }

    /// Dates, most recent first.
    pub fn list(&self) -> Vec<CalendarDate> {
        self.entries.iter().map(|e| e.anchor_date).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove `date`. The default entry is left in place. Returns whether
    /// anything was removed.
    pub fn remove(&mut self, date: CalendarDate) -> bool {
        match self.position(date) {
            Some(i) if !self.entries[i].is_default => {
                self.entries.remove(i);
                true
            }
            _ => false,
        }
    }

    /// Drop every entry except the default, recreating it if absent.
    pub fn clear(&mut self) {
        self.entries.retain(|e| e.is_default);
        if self.entries.is_empty() {
            self.entries
                .push_back(HistoryEntry::default_for(self.default_anchor, now_iso8601()));
        }
    }
}
