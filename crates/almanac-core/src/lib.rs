//! Deterministic date-derived almanac engine.
//!
//! Given a calendar date (and usually an anchor date) it computes three
//! sinusoidal cycle values, a position on a 260-day ceremonial calendar,
//! seeded selections from content pools, five-element compatibility and
//! dress/food suggestions, rhythm summaries and seasonal guidance. The same
//! inputs always give the same outputs.
//!
//! Zero I/O: content tables and the history store are handed in by the
//! caller. See `almanac-store` for SQLite persistence and content loading.

pub mod almanac;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod content;
pub mod cycle;
pub mod date;
pub mod dress;
pub mod element;
pub mod energy;
pub mod engine;
pub mod error;
pub mod guide;
pub mod history;
pub mod persist;
pub mod season;
pub mod seed;
pub mod selector;
pub mod snapshot;
pub mod time;

pub use almanac::{
    BirthChart, CalendarInfo, EnergyGuidance, EnergyMatch, LuckyItems, MoonInfo, birth_chart,
    calendar_info, energy_guidance,
};
pub use calendar::{CalendarPosition, MoonDate, SeasonalMarker};
pub use config::{EngineConfig, HistoryConfig};
pub use content::{ByElement, ContentPool, ContentTables};
pub use cycle::{
    Cycle, CyclePeriods, CycleRange, CycleValues, CycleWeights, DayOutlook, DayScore,
    MonthExtremes, month_extremes,
};
pub use date::{CalendarDate, DateRange, Weekday, day_offset};
pub use dress::{ColorSuggestion, DressSuggestion, FoodSuggestions, Luck, dress_suggestion};
pub use element::{
    CompatibilityBands, Element, ElementRelation, Relation, Zodiac, daily_element, weekday_element,
};
pub use energy::{EnergyBand, EnergyCategory, EnergyReading, Trend};
pub use engine::{CycleReport, Engine, HealthReport, HealthStatus, ServicesReady};
pub use error::{EngineError, Result};
pub use guide::{
    CycleStatuses, DaySummary, DayType, RhythmStatus, TrendDay, day_summary, weekly_trend,
};
pub use history::{HistoryEntry, HistoryLedger};
pub use persist::{InMemoryStore, PreferenceStore};
pub use season::{
    ElementCare, OrganWindow, Season, SeasonHealth, element_care, organ_window, season_health,
};
pub use seed::{Seed, label_hash};
pub use snapshot::{LedgerSnapshot, Preferences, SNAPSHOT_VERSION, export_json, import_json};
