//! Sinusoidal cycle amplitudes.
//!
//! Each cycle is `round(100 · sin(2π · offset / period))` where `offset` is
//! the whole-day distance from an anchor date. Values are integers in
//! [-100, 100]; the weighted combination is rounded to one decimal.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::constants::{AMPLITUDE, EMOTIONAL_PERIOD, INTELLECTUAL_PERIOD, PHYSICAL_PERIOD};
use crate::date::{CalendarDate, DateRange, days_in_month, day_offset};
use crate::error::{EngineError, Result};

/// Amplitude of a `period`-day cycle at `offset` days from its anchor.
///
/// The offset is reduced modulo the period first, so arbitrarily distant
/// dates keep full precision.
pub fn amplitude(period: u32, offset: i64) -> i32 {
    let phase = offset.rem_euclid(period as i64) as f64 / period as f64;
    (AMPLITUDE * (TAU * phase).sin()).round() as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    Physical,
    Emotional,
    Intellectual,
}

impl Cycle {
    pub const ALL: [Cycle; 3] = [Cycle::Physical, Cycle::Emotional, Cycle::Intellectual];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclePeriods {
    pub physical: u32,
    pub emotional: u32,
    pub intellectual: u32,
}

impl Default for CyclePeriods {
    fn default() -> Self {
        Self {
            physical: PHYSICAL_PERIOD,
            emotional: EMOTIONAL_PERIOD,
            intellectual: INTELLECTUAL_PERIOD,
        }
    }
}

impl CyclePeriods {
    pub fn validate(&self) -> Result<()> {
        for cycle in Cycle::ALL {
            if self.period(cycle) == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{cycle:?} period must be positive"
                )));
            }
        }
        Ok(())
    }

    pub fn period(&self, cycle: Cycle) -> u32 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }

    /// Cycle values for `target` relative to `anchor`.
    pub fn values(&self, anchor: CalendarDate, target: CalendarDate) -> CycleValues {
        self.values_at(day_offset(anchor, target))
    }

    pub fn values_at(&self, offset: i64) -> CycleValues {
        CycleValues {
            physical: amplitude(self.physical, offset),
            emotional: amplitude(self.emotional, offset),
            intellectual: amplitude(self.intellectual, offset),
        }
    }

    /// Column-wise values for every date of `dates`, in iteration order.
    pub fn range(&self, anchor: CalendarDate, dates: DateRange) -> CycleRange {
        let mut out = CycleRange::with_capacity(dates.len());
        for date in dates {
            let v = self.values(anchor, date);
            out.dates.push(date);
            out.physical.push(v.physical);
            out.emotional.push(v.emotional);
            out.intellectual.push(v.intellectual);
        }
        out
    }
}

/// Relative weight of each cycle in the combined score. Must sum to 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleWeights {
    pub physical: f64,
    pub emotional: f64,
    pub intellectual: f64,
}

impl Default for CycleWeights {
    fn default() -> Self {
        Self {
            physical: 0.33,
            emotional: 0.33,
            intellectual: 0.34,
        }
    }
}

impl CycleWeights {
    pub fn validate(&self) -> Result<()> {
        let parts = [self.physical, self.emotional, self.intellectual];
        if parts.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "cycle weights must be non-negative: {parts:?}"
            )));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidConfig(format!(
                "cycle weights must sum to 1, got {sum}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleValues {
    pub physical: i32,
    pub emotional: i32,
    pub intellectual: i32,
}

impl CycleValues {
    pub fn get(&self, cycle: Cycle) -> i32 {
        match cycle {
            Cycle::Physical => self.physical,
            Cycle::Emotional => self.emotional,
            Cycle::Intellectual => self.intellectual,
        }
    }

    pub fn total(&self) -> i32 {
        self.physical + self.emotional + self.intellectual
    }

    /// Weighted combination rounded to one decimal.
    pub fn combined(&self, weights: &CycleWeights) -> f64 {
        let raw = self.physical as f64 * weights.physical
            + self.emotional as f64 * weights.emotional
            + self.intellectual as f64 * weights.intellectual;
        (raw * 10.0).round() / 10.0
    }

    pub fn outlook(&self) -> DayOutlook {
        DayOutlook::from_total(self.total())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRange {
    pub dates: Vec<CalendarDate>,
    pub physical: Vec<i32>,
    pub emotional: Vec<i32>,
    pub intellectual: Vec<i32>,
}

impl CycleRange {
    fn with_capacity(n: usize) -> Self {
        Self {
            dates: Vec::with_capacity(n),
            physical: Vec::with_capacity(n),
            emotional: Vec::with_capacity(n),
            intellectual: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Coarse classification of a day by the sum of its three cycle values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutlook {
    Excellent,
    Good,
    Average,
    Poor,
    Critical,
}

impl DayOutlook {
    pub fn from_total(total: i32) -> Self {
        match total {
            t if t >= 200 => DayOutlook::Excellent,
            t if t >= 100 => DayOutlook::Good,
            t if t >= 0 => DayOutlook::Average,
            t if t >= -100 => DayOutlook::Poor,
            _ => DayOutlook::Critical,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayScore {
    pub date: CalendarDate,
    pub combined: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthExtremes {
    pub best: DayScore,
    pub worst: DayScore,
}

/// Highest and lowest combined day of a month. Ties keep the earliest day.
pub fn month_extremes(
    periods: &CyclePeriods,
    weights: &CycleWeights,
    anchor: CalendarDate,
    year: i32,
    month: u8,
) -> Result<MonthExtremes> {
    let first = CalendarDate::new(year, month, 1)?;
    let last = CalendarDate::new(year, month, days_in_month(year, month))?;

    let mut days = CalendarDate::range(first, last).map(|date| DayScore {
        date,
        combined: periods.values(anchor, date).combined(weights),
    });
    // A valid month has at least 28 days.
    let opening = days
        .next()
        .ok_or_else(|| EngineError::InvalidDateFormat(format!("empty month {year}-{month:02}")))?;

    let mut extremes = MonthExtremes {
        best: opening,
        worst: opening,
    };
    for day in days {
        if day.combined > extremes.best.combined {
            extremes.best = day;
        }
        if day.combined < extremes.worst.combined {
            extremes.worst = day;
        }
    }
    Ok(extremes)
}
