//! Wall-clock readings.
//!
//! `HistoryEntry::last_used` and snapshot export times read the UTC clock.
//! The organ clock defaults to the local hour when none is given.

use chrono::{DateTime, Local, SecondsFormat, Timelike, Utc};

/// Current UTC timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
pub fn now_iso8601() -> String {
    iso8601(Utc::now())
}

pub fn iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Local hour of day, 0–23.
pub fn current_hour() -> u8 {
    Local::now().hour() as u8
}
