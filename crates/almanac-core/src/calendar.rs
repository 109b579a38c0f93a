//! Position in the 260-day cyclical calendar, the thirteen-moon date and
//! the four seasonal markers.
//!
//! The 260 slots are the product of two interleaved sub-cycles: tones (13)
//! and seals (20). Because 13 and 20 are coprime, an ordinal and its pair of
//! residues determine each other.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANCHOR_DAY, ANCHOR_MONTH, ANCHOR_ORDINAL, ANCHOR_YEAR, CALENDAR_CYCLE, MOON_COUNT, MOON_LENGTH,
    MOON_YEAR_START, SUB_CYCLE_A, SUB_CYCLE_B,
};
use crate::date::{CalendarDate, day_offset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarPosition {
    /// 1..=260
    pub ordinal: u16,
    /// Tone index, 0..=12.
    pub tone: u8,
    /// Seal index, 0..=19.
    pub seal: u8,
}

impl CalendarPosition {
    /// Normalize any integer onto the 1..=260 ring.
    pub fn from_ordinal(ordinal: i64) -> Self {
        let zero_based = (ordinal - 1).rem_euclid(CALENDAR_CYCLE);
        Self {
            ordinal: (zero_based + 1) as u16,
            tone: (zero_based % SUB_CYCLE_A) as u8,
            seal: (zero_based % SUB_CYCLE_B) as u8,
        }
    }

    /// Inverse of the residue split. `None` when either index is out of range.
    pub fn from_residues(tone: u8, seal: u8) -> Option<Self> {
        if tone as i64 >= SUB_CYCLE_A || seal as i64 >= SUB_CYCLE_B {
            return None;
        }
        (0..SUB_CYCLE_B)
            .map(|k| tone as i64 + SUB_CYCLE_A * k)
            .find(|n| n % SUB_CYCLE_B == seal as i64)
            .map(|n| Self::from_ordinal(n + 1))
    }

    /// Position of `date` relative to the fixed anchor (2025-09-23 = 183).
    pub fn resolve(date: CalendarDate) -> Self {
        Self::from_ordinal(ANCHOR_ORDINAL + day_offset(ANCHOR, date))
    }
}

const ANCHOR: CalendarDate = CalendarDate::from_ymd_unchecked(ANCHOR_YEAR, ANCHOR_MONTH, ANCHOR_DAY);

/// Thirteen-moon date: the year opens on 26 July and runs thirteen 28-day
/// moons. The one or two days left over stay in the thirteenth moon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonDate {
    /// 1..=13
    pub moon: u8,
    /// 1..=28, or 29/30 at the tail of the thirteenth moon.
    pub day: u8,
}

impl MoonDate {
    pub fn of(date: CalendarDate) -> Self {
        let (start_month, start_day) = MOON_YEAR_START;
        let start_year = if (date.month(), date.day()) < (start_month, start_day) {
            date.year() - 1
        } else {
            date.year()
        };
        // 26 July exists in every year.
        let start = CalendarDate::from_ymd_unchecked(start_year, start_month, start_day);
        let days_in = day_offset(start, date);

        let moon = (days_in / MOON_LENGTH).min(MOON_COUNT - 1);
        let day = days_in - moon * MOON_LENGTH + 1;
        Self {
            moon: (moon + 1) as u8,
            day: day as u8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalMarker {
    SpringEquinox,
    SummerSolstice,
    AutumnEquinox,
    WinterSolstice,
}

impl SeasonalMarker {
    /// Fixed-date approximation; no astronomical computation.
    pub fn for_date(date: CalendarDate) -> Option<Self> {
        match (date.month(), date.day()) {
            (3, 20) => Some(SeasonalMarker::SpringEquinox),
            (6, 21) => Some(SeasonalMarker::SummerSolstice),
            (9, 23) => Some(SeasonalMarker::AutumnEquinox),
            (12, 21) => Some(SeasonalMarker::WinterSolstice),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SeasonalMarker::SpringEquinox => "spring equinox",
            SeasonalMarker::SummerSolstice => "summer solstice",
            SeasonalMarker::AutumnEquinox => "autumn equinox",
            SeasonalMarker::WinterSolstice => "winter solstice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_anchor_is_183() {
        let p = CalendarPosition::resolve(date("2025-09-23"));
        assert_eq!(p, CalendarPosition { ordinal: 183, tone: 0, seal: 2 });
    }

    #[test]
    fn test_neighbours_of_anchor() {
        assert_eq!(CalendarPosition::resolve(date("2025-09-24")).ordinal, 184);
        assert_eq!(CalendarPosition::resolve(date("2025-09-22")).ordinal, 182);
    }

    #[test]
    fn test_one_year_later_wraps() {
        assert_eq!(CalendarPosition::resolve(date("2026-09-23")).ordinal, 28);
    }

    #[test]
    fn test_ring_edges() {
        assert_eq!(CalendarPosition::from_ordinal(260).ordinal, 260);
        assert_eq!(CalendarPosition::from_ordinal(261).ordinal, 1);
        assert_eq!(CalendarPosition::from_ordinal(0).ordinal, 260);
        assert_eq!(CalendarPosition::from_ordinal(-259).ordinal, 1);
        let last = CalendarPosition::from_ordinal(260);
        assert_eq!((last.tone, last.seal), (12, 19));
    }

    #[test]
    fn test_from_residues_rejects_out_of_range() {
        assert_eq!(CalendarPosition::from_residues(13, 0), None);
        assert_eq!(CalendarPosition::from_residues(0, 20), None);
    }

    #[test]
    fn test_moon_date() {
        assert_eq!(MoonDate::of(date("2025-07-26")), MoonDate { moon: 1, day: 1 });
        assert_eq!(MoonDate::of(date("2025-08-22")), MoonDate { moon: 1, day: 28 });
        assert_eq!(MoonDate::of(date("2025-08-23")), MoonDate { moon: 2, day: 1 });
        assert_eq!(MoonDate::of(date("2025-07-25")), MoonDate { moon: 13, day: 29 });
        // 2023-07-26 .. 2024-07-25 spans Feb 29
        assert_eq!(MoonDate::of(date("2024-07-25")), MoonDate { moon: 13, day: 30 });
        assert_eq!(MoonDate::of(date("2026-01-01")).moon, 6);
    }

    #[test]
    fn test_seasonal_markers() {
        assert_eq!(SeasonalMarker::for_date(date("2025-03-20")), Some(SeasonalMarker::SpringEquinox));
        assert_eq!(SeasonalMarker::for_date(date("2025-12-21")), Some(SeasonalMarker::WinterSolstice));
        assert_eq!(SeasonalMarker::for_date(date("2025-12-22")), None);
    }

    proptest! {
        #[test]
        fn prop_ordinal_in_range(days in -5_000_000i64..5_000_000) {
            let p = CalendarPosition::resolve(CalendarDate::from_day_number(days));
            prop_assert!((1..=260).contains(&p.ordinal));
            prop_assert!(p.tone < 13 && p.seal < 20);
        }

        #[test]
        fn prop_periodicity(days in -2_000_000i64..2_000_000) {
            let d = CalendarDate::from_day_number(days);
            let p = CalendarPosition::resolve(d);
            prop_assert_eq!(CalendarPosition::resolve(d.add_days(260)), p);
            prop_assert_eq!(CalendarPosition::resolve(d.add_days(13)).tone, p.tone);
            prop_assert_eq!(CalendarPosition::resolve(d.add_days(20)).seal, p.seal);
        }

        #[test]
        fn prop_residues_determine_ordinal(ordinal in 1i64..=260) {
            let p = CalendarPosition::from_ordinal(ordinal);
            prop_assert_eq!(CalendarPosition::from_residues(p.tone, p.seal), Some(p));
        }

        // Stepping each sub-index independently from the anchor's (0, 2)
        // lands on the same residues as the single-ordinal formula.
        #[test]
        fn prop_stepped_residues_agree(days in -2_000_000i64..2_000_000) {
            let anchor = CalendarDate::new(2025, 9, 23).unwrap();
            let d = CalendarDate::from_day_number(days);
            let off = day_offset(anchor, d);
            let tone = off.rem_euclid(13) as u8;
            let seal = (2 + off).rem_euclid(20) as u8;
            let p = CalendarPosition::resolve(d);
            prop_assert_eq!((p.tone, p.seal), (tone, seal));
        }
    }
}
