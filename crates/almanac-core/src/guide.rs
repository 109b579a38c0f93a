//! Rhythm readings built on cycle values: a status band per cycle, the
//! day summary, and a seven-day trend.

use serde::{Deserialize, Serialize};

use crate::constants::TREND_DAYS;
use crate::cycle::{CyclePeriods, CycleValues, DayOutlook};
use crate::date::{CalendarDate, Weekday};

/// Band of one cycle value by magnitude, mirrored around zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmStatus {
    Peak,
    Strong,
    Good,
    Fair,
    Stable,
    Dipping,
    Weak,
    Drained,
    Trough,
}

impl RhythmStatus {
    /// `|v| ≥ 90`, `≥ 70`, `≥ 50`, `≥ 30` on either side of zero; anything
    /// closer to zero is stable.
    pub fn from_value(value: i32) -> Self {
        let rising = value > 0;
        match value.unsigned_abs() {
            90.. if rising => RhythmStatus::Peak,
            90.. => RhythmStatus::Trough,
            70..=89 if rising => RhythmStatus::Strong,
            70..=89 => RhythmStatus::Drained,
            50..=69 if rising => RhythmStatus::Good,
            50..=69 => RhythmStatus::Weak,
            30..=49 if rising => RhythmStatus::Fair,
            30..=49 => RhythmStatus::Dipping,
            _ => RhythmStatus::Stable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatuses {
    pub physical: RhythmStatus,
    pub emotional: RhythmStatus,
    pub intellectual: RhythmStatus,
}

impl From<CycleValues> for CycleStatuses {
    fn from(v: CycleValues) -> Self {
        Self {
            physical: RhythmStatus::from_value(v.physical),
            emotional: RhythmStatus::from_value(v.emotional),
            intellectual: RhythmStatus::from_value(v.intellectual),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: CalendarDate,
    pub outlook: DayOutlook,
    pub title: &'static str,
    pub description: &'static str,
    /// Plain sum of the three cycle values.
    pub total: i32,
    pub status: CycleStatuses,
}

fn headline(outlook: DayOutlook) -> (&'static str, &'static str) {
    match outlook {
        DayOutlook::Excellent => (
            "Peak performance day",
            "All three rhythms are running high; a strong day for ambitious work.",
        ),
        DayOutlook::Good => (
            "High-energy day",
            "A good day for important tasks and creative work.",
        ),
        DayOutlook::Average => (
            "Steady day",
            "An even day, suited to ordinary work and routines.",
        ),
        DayOutlook::Poor => (
            "Rest day",
            "Ease off today and avoid high-intensity activity.",
        ),
        DayOutlook::Critical => (
            "Low ebb",
            "The rhythms are at a low point; put rest first.",
        ),
    }
}

pub fn day_summary(date: CalendarDate, values: CycleValues) -> DaySummary {
    let outlook = values.outlook();
    let (title, description) = headline(outlook);
    DaySummary {
        date,
        outlook,
        title,
        description,
        total: values.total(),
        status: values.into(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl From<Weekday> for DayType {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Saturday | Weekday::Sunday => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDay {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub day_type: DayType,
    #[serde(flatten)]
    pub values: CycleValues,
}

/// Cycle values for the seven days starting at `start`.
pub fn weekly_trend(periods: &CyclePeriods, anchor: CalendarDate, start: CalendarDate) -> Vec<TrendDay> {
    CalendarDate::around(start, 0, TREND_DAYS - 1)
        .map(|date| {
            let weekday = date.weekday();
            TrendDay {
                date,
                weekday,
                day_type: weekday.into(),
                values: periods.values(anchor, date),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_status_band_edges() {
        use RhythmStatus::*;
        let cases = [
            (100, Peak),
            (90, Peak),
            (89, Strong),
            (70, Strong),
            (69, Good),
            (50, Good),
            (49, Fair),
            (30, Fair),
            (29, Stable),
            (0, Stable),
            (-29, Stable),
            (-30, Dipping),
            (-49, Dipping),
            (-50, Weak),
            (-69, Weak),
            (-70, Drained),
            (-89, Drained),
            (-90, Trough),
            (-100, Trough),
        ];
        for (value, want) in cases {
            assert_eq!(RhythmStatus::from_value(value), want, "value {value}");
        }
    }

    #[test]
    fn test_summary_of_a_high_day() {
        let periods = CyclePeriods::default();
        let d = date("1991-01-07");
        let values = periods.values(date("1991-01-01"), d);
        assert_eq!(values, CycleValues { physical: 100, emotional: 97, intellectual: 91 });

        let s = day_summary(d, values);
        assert_eq!(s.total, 288);
        assert_eq!(s.outlook, DayOutlook::Excellent);
        assert_eq!(s.title, "Peak performance day");
        assert_eq!(s.status.intellectual, RhythmStatus::Peak);
    }

    #[test]
    fn test_summary_totals_follow_outlook_bands() {
        let at = |p, e, i| day_summary(date("2025-01-01"), CycleValues { physical: p, emotional: e, intellectual: i });
        assert_eq!(at(100, 100, 0).outlook, DayOutlook::Excellent);
        assert_eq!(at(100, 99, 0).outlook, DayOutlook::Good);
        assert_eq!(at(0, 0, 0).outlook, DayOutlook::Average);
        assert_eq!(at(-1, 0, 0).outlook, DayOutlook::Poor);
        let low = at(-100, -1, 0);
        assert_eq!(low.outlook, DayOutlook::Critical);
        assert_eq!(low.title, "Low ebb");
        assert_eq!(low.status.physical, RhythmStatus::Trough);
    }

    #[test]
    fn test_weekly_trend_day_types() {
        let periods = CyclePeriods::default();
        // 1990-06-15 is a Friday
        let trend = weekly_trend(&periods, date("1990-06-15"), date("1990-06-15"));
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].values, CycleValues { physical: 0, emotional: 0, intellectual: 0 });
        let types: Vec<DayType> = trend.iter().map(|d| d.day_type).collect();
        assert_eq!(
            types,
            vec![
                DayType::Weekday,
                DayType::Weekend,
                DayType::Weekend,
                DayType::Weekday,
                DayType::Weekday,
                DayType::Weekday,
                DayType::Weekday,
            ]
        );
        assert_eq!(trend[6].date.to_string(), "1990-06-21");
        assert_eq!(trend[6].weekday, Weekday::Thursday);
        assert_eq!(trend[6].values.physical, 100);
    }
}
