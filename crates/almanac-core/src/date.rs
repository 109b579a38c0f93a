//! Calendar-date normalization and proleptic day arithmetic.
//!
//! A date here is a `{year, month, day}` triple, never an instant. Strings are
//! decomposed component by component; no instant parser is involved, so the
//! result cannot drift by a day with the runtime's UTC offset.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)(\d{4,9})-(\d{2})-(\d{2})$").unwrap());

/// A valid proleptic Gregorian date. Ordering follows the triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday = 0 … Sunday = 6.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDateFormat(format!(
                "month {month} out of range in {year}-{month:02}-{day:02}"
            )));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(EngineError::InvalidDateFormat(format!(
                "day {day} out of range in {year}-{month:02}-{day:02}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Caller guarantees the triple is valid.
    pub(crate) const fn from_ymd_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Parse `YYYY-MM-DD`. Years outside 0000..=9999 carry an explicit sign.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidDateFormat(format!("expected YYYY-MM-DD, got '{s}'"));
        let caps = DATE_SHAPE.captures(s).ok_or_else(invalid)?;

        let sign = &caps[1];
        let digits = &caps[2];
        let magnitude: i32 = digits.parse().map_err(|_| invalid())?;
        let year = match sign {
            "" if digits.len() == 4 => magnitude,
            "+" if magnitude > 9999 => magnitude,
            "-" if magnitude > 0 => -magnitude,
            _ => return Err(invalid()),
        };
        // Leading zeros are only allowed to pad to four digits.
        if digits.len() > 4 && digits.starts_with('0') {
            return Err(invalid());
        }

        let month: u8 = caps[3].parse().map_err(|_| invalid())?;
        let day: u8 = caps[4].parse().map_err(|_| invalid())?;
        Self::new(year, month, day)
    }

    /// `None` means the current local calendar date.
    pub fn resolve(input: Option<&str>) -> Result<Self> {
        match input {
            Some(s) => Self::parse(s),
            None => Ok(Self::today()),
        }
    }

    /// Current local calendar date. The only place the engine reads the clock
    /// for a date.
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (Hinnant's days_from_civil).
    pub fn day_number(self) -> i64 {
        days_from_civil(self.year as i64, self.month as u32, self.day as u32)
    }

    pub fn from_day_number(days: i64) -> Self {
        let (y, m, d) = civil_from_days(days);
        Self {
            year: y as i32,
            month: m as u8,
            day: d as u8,
        }
    }

    pub fn add_days(self, days: i64) -> Self {
        Self::from_day_number(self.day_number() + days)
    }

    /// Whole days from `self` to `target` (target − self).
    pub fn days_until(self, target: CalendarDate) -> i64 {
        target.day_number() - self.day_number()
    }

    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday (index 3).
        Weekday::ALL[(self.day_number() + 3).rem_euclid(7) as usize]
    }

    /// 1-based day of the year.
    pub fn day_of_year(self) -> u32 {
        (self.day_number() - days_from_civil(self.year as i64, 1, 1) + 1) as u32
    }

    /// Inclusive ascending range; empty when `to` precedes `from`.
    pub fn range(from: CalendarDate, to: CalendarDate) -> DateRange {
        DateRange {
            next: from.day_number(),
            end: to.day_number(),
        }
    }

    /// The window `[center - before, center + after]`.
    pub fn around(center: CalendarDate, before: u32, after: u32) -> DateRange {
        let mid = center.day_number();
        DateRange {
            next: mid - before as i64,
            end: mid + after as i64,
        }
    }
}

/// Whole days between two dates: `target − anchor`.
pub fn day_offset(anchor: CalendarDate, target: CalendarDate) -> i64 {
    anchor.days_until(target)
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            0..=9999 => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
            y if y > 9999 => write!(f, "+{}-{:02}-{:02}", y, self.month, self.day),
            y => write!(f, "-{:04}-{:02}-{:02}", y.unsigned_abs(), self.month, self.day),
        }
    }
}

impl FromStr for CalendarDate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

/// Iterator over consecutive calendar dates.
#[derive(Clone, Debug)]
pub struct DateRange {
    next: i64,
    end: i64,
}

impl Iterator for DateRange {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<CalendarDate> {
        if self.next > self.end {
            return None;
        }
        let date = CalendarDate::from_day_number(self.next);
        self.next += 1;
        Some(date)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end - self.next + 1).max(0) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for DateRange {}

/// Howard Hinnant's days_from_civil: (year, month, day) → Unix epoch days.
fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = ((m + 9) % 12) as u64;
    let doy = (153 * mp + 2) / 5 + d as u64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe as i64 - 719468
}

/// Howard Hinnant's civil_from_days: Unix epoch days → (year, month, day).
fn civil_from_days(days: i64) -> (i64, u64, u64) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
