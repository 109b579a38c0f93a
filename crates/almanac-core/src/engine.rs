//! The engine facade: one explicitly constructed owner of configuration,
//! content tables, the history ledger and its store.
//!
//! Every request that carries an anchor date records it in the ledger and
//! saves synchronously. Compute requests treat a failed save as soft: the
//! failure is logged, kept for `health_check`, and the computed answer is
//! still returned. Explicit history operations return the failure to the
//! caller. The in-memory ledger is never rolled back.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::almanac::{
    BirthChart, CalendarInfo, EnergyGuidance, birth_chart, calendar_info, energy_guidance,
};
use crate::config::EngineConfig;
use crate::content::ContentTables;
use crate::cycle::{CycleRange, CycleValues, DayOutlook, MonthExtremes, month_extremes};
use crate::constants::MAX_RANGE_DAYS;
use crate::date::{CalendarDate, DateRange, day_offset};
use crate::dress::{DressSuggestion, dress_suggestion};
use crate::element::{Element, ElementRelation, Zodiac, daily_element};
use crate::error::{EngineError, Result};
use crate::guide::{DaySummary, TrendDay, day_summary, weekly_trend};
use crate::history::{HistoryEntry, HistoryLedger};
use crate::persist::PreferenceStore;
use crate::season::{SeasonHealth, season_health};
use crate::snapshot::{LedgerSnapshot, Preferences};
use crate::time::current_hour;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub anchor: CalendarDate,
    pub target: CalendarDate,
    pub offset: i64,
    #[serde(flatten)]
    pub values: CycleValues,
    pub combined: f64,
    pub outlook: DayOutlook,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesReady {
    pub engine: bool,
    pub content: bool,
    pub persistence: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub services_ready: ServicesReady,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_pools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_persistence_error: Option<String>,
}

pub struct Engine<S: PreferenceStore> {
    config: EngineConfig,
    content: ContentTables,
    ledger: HistoryLedger,
    preferences: Preferences,
    store: S,
    last_save_error: Option<EngineError>,
}

impl<S: PreferenceStore> Engine<S> {
    /// Build an engine. An unreadable store is logged and the ledger starts
    /// fresh; only an invalid configuration fails construction.
    pub fn new(config: EngineConfig, content: ContentTables, store: S) -> Result<Self> {
        config.validate()?;
        let cap = config.history.cap;
        let default_anchor = config.history.default_anchor;

        let missing = content.missing_pools();
        if !missing.is_empty() {
            warn!(?missing, "content tables incomplete");
        }

        let (ledger, preferences) = match store.load() {
            Ok(Some(snapshot)) => {
                debug!(entries = snapshot.entries.len(), "loaded history");
                (snapshot.to_ledger(cap, default_anchor)?, snapshot.preferences)
            }
            Ok(None) => (HistoryLedger::new(cap, default_anchor)?, Preferences::default()),
            Err(e) => {
                warn!(error = %e, "history unavailable, starting fresh");
                (HistoryLedger::new(cap, default_anchor)?, Preferences::default())
            }
        };

        Ok(Self {
            config,
            content,
            ledger,
            preferences,
            store,
            last_save_error: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn content(&self) -> &ContentTables {
        &self.content
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // --- Cycles ---

    /// Cycle values of `target` (today when `None`) relative to `anchor`.
    pub fn get_cycle_values(&mut self, anchor: &str, target: Option<&str>) -> Result<CycleReport> {
        let anchor = CalendarDate::parse(anchor)?;
        let target = CalendarDate::resolve(target)?;
        let values = self.config.periods.values(anchor, target);
        let report = CycleReport {
            anchor,
            target,
            offset: day_offset(anchor, target),
            values,
            combined: values.combined(&self.config.weights),
            outlook: values.outlook(),
        };
        self.record_soft(anchor);
        Ok(report)
    }

    /// Inclusive ascending range `from..=to`; empty when `to` precedes `from`.
    /// At most [`MAX_RANGE_DAYS`] days.
    pub fn get_cycle_range(&mut self, anchor: &str, from: &str, to: &str) -> Result<CycleRange> {
        let anchor = CalendarDate::parse(anchor)?;
        let from = CalendarDate::parse(from)?;
        let to = CalendarDate::parse(to)?;
        let dates = bounded(CalendarDate::range(from, to))?;
        let range = self.config.periods.range(anchor, dates);
        self.record_soft(anchor);
        Ok(range)
    }

    /// The window `[center - before, center + after]`, centred on today when
    /// `center` is `None`.
    pub fn get_cycle_window(
        &mut self,
        anchor: &str,
        center: Option<&str>,
        before: u32,
        after: u32,
    ) -> Result<CycleRange> {
        let anchor = CalendarDate::parse(anchor)?;
        let center = CalendarDate::resolve(center)?;
        let dates = bounded(CalendarDate::around(center, before, after))?;
        let range = self.config.periods.range(anchor, dates);
        self.record_soft(anchor);
        Ok(range)
    }

    pub fn get_month_extremes(&mut self, anchor: &str, year: i32, month: u8) -> Result<MonthExtremes> {
        let anchor = CalendarDate::parse(anchor)?;
        let extremes = month_extremes(
            &self.config.periods,
            &self.config.weights,
            anchor,
            year,
            month,
        )?;
        self.record_soft(anchor);
        Ok(extremes)
    }

    /// Seven days of cycle values starting at `start` (today when `None`).
    pub fn get_weekly_trend(&mut self, anchor: &str, start: Option<&str>) -> Result<Vec<TrendDay>> {
        let anchor = CalendarDate::parse(anchor)?;
        let start = CalendarDate::resolve(start)?;
        let trend = weekly_trend(&self.config.periods, anchor, start);
        self.record_soft(anchor);
        Ok(trend)
    }

    pub fn get_day_summary(&mut self, anchor: &str, target: Option<&str>) -> Result<DaySummary> {
        let anchor = CalendarDate::parse(anchor)?;
        let target = CalendarDate::resolve(target)?;
        let summary = day_summary(target, self.config.periods.values(anchor, target));
        self.record_soft(anchor);
        Ok(summary)
    }

    // --- Readings ---

    pub fn get_calendar_info(&self, date: Option<&str>) -> Result<CalendarInfo> {
        calendar_info(CalendarDate::resolve(date)?, &self.content.calendar)
    }

    pub fn get_birth_chart(&mut self, anchor: &str) -> Result<BirthChart> {
        let anchor = CalendarDate::parse(anchor)?;
        let chart = birth_chart(anchor, &self.content.calendar)?;
        self.record_soft(anchor);
        Ok(chart)
    }

    pub fn get_dress_suggestion(&self, date: Option<&str>) -> Result<DressSuggestion> {
        dress_suggestion(CalendarDate::resolve(date)?, &self.content.dress)
    }

    /// `zodiac` is an animal name or a birth year.
    pub fn get_energy_guidance(&self, zodiac: &str, date: Option<&str>) -> Result<EnergyGuidance> {
        let zodiac = parse_zodiac(zodiac)?;
        let date = CalendarDate::resolve(date)?;
        Ok(energy_guidance(
            zodiac,
            date,
            &self.config.bands,
            &self.content.zodiac,
            &self.content.dress.element_foods,
        ))
    }

    /// Season and organ clock for `date` at `hour`; today and the local
    /// hour stand in for missing values.
    pub fn get_season_health(&self, date: Option<&str>, hour: Option<u8>) -> Result<SeasonHealth> {
        let date = CalendarDate::resolve(date)?;
        season_health(date, hour.unwrap_or_else(current_hour))
    }

    /// Relation of element `from` to `to`. Without `to`, the other side is
    /// the daily element of `date`.
    pub fn element_relation(
        &self,
        from: &str,
        to: Option<&str>,
        date: Option<&str>,
    ) -> Result<ElementRelation> {
        let from: Element = from.parse()?;
        let to = match to {
            Some(name) => name.parse()?,
            None => daily_element(CalendarDate::resolve(date)?),
        };
        Ok(ElementRelation::resolve(from, to, &self.config.bands))
    }

    // --- History ---

    pub fn record_anchor(&mut self, anchor: &str) -> Result<CalendarDate> {
        let anchor = CalendarDate::parse(anchor)?;
        self.ledger.record(anchor);
        self.persist()?;
        Ok(anchor)
    }

    /// Anchor dates, most recent first.
    pub fn list_history(&self) -> Vec<String> {
        self.ledger.list().iter().map(ToString::to_string).collect()
    }

    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.ledger.entries().cloned().collect()
    }

    /// Returns whether an entry was removed. Removing the default is a no-op.
    pub fn remove_from_history(&mut self, anchor: &str) -> Result<bool> {
        let anchor = CalendarDate::parse(anchor)?;
        if !self.ledger.remove(anchor) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.ledger.clear();
        self.persist()
    }

    pub fn export_snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&self.ledger, &self.preferences)
    }

    /// Replace the ledger and preferences. The configured cap and default
    /// anchor win over the snapshot's own.
    pub fn import_snapshot(&mut self, snapshot: LedgerSnapshot) -> Result<()> {
        let ledger =
            snapshot.to_ledger(self.config.history.cap, self.config.history.default_anchor)?;
        debug!(
            imported = snapshot.entries.len(),
            kept = ledger.len(),
            "imported history"
        );
        self.ledger = ledger;
        self.preferences = snapshot.preferences;
        self.persist()
    }

    // --- Health ---

    pub fn health_check(&self) -> HealthReport {
        let missing: Vec<String> = self
            .content
            .missing_pools()
            .into_iter()
            .map(str::to_string)
            .collect();
        let services_ready = ServicesReady {
            engine: true,
            content: missing.is_empty(),
            persistence: self.store.is_ready() && self.last_save_error.is_none(),
        };
        let status = if services_ready.content && services_ready.persistence {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };
        HealthReport {
            status,
            services_ready,
            missing_pools: missing,
            last_persistence_error: self.last_save_error.as_ref().map(ToString::to_string),
        }
    }

    fn persist(&mut self) -> Result<()> {
        let snapshot = LedgerSnapshot::capture(&self.ledger, &self.preferences);
        match self.store.save(&snapshot) {
            Ok(()) => {
                self.last_save_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to save history");
                self.last_save_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Record a side-effect use. A save failure is already logged and kept.
    fn record_soft(&mut self, anchor: CalendarDate) {
        self.ledger.record(anchor);
        let _ = self.persist();
    }
}

fn parse_zodiac(input: &str) -> Result<Zodiac> {
    match input.trim().parse::<i32>() {
        Ok(year) => Ok(Zodiac::from_year(year)),
        Err(_) => input.parse(),
    }
}

fn bounded(dates: DateRange) -> Result<DateRange> {
    let days = dates.len();
    if days > MAX_RANGE_DAYS {
        return Err(EngineError::InvalidRange(format!(
            "{days} days requested, at most {MAX_RANGE_DAYS} allowed"
        )));
    }
    Ok(dates)
}
