//! Integer seeds derived from dates and labels.
//!
//! A seed is a pure function of its inputs: `year·10000 + month·100 + day`,
//! plus any integer offset, plus the hash of any label. Nothing here holds
//! state between calls.

use std::fmt;

use crate::constants::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use crate::date::CalendarDate;

/// 32-bit polynomial string hash (`h·31 + unit`) over UTF-16 code units,
/// with wrapping arithmetic, returned as an absolute value.
pub fn label_hash(label: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in label.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(i64);

impl Seed {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn from_date(date: CalendarDate) -> Self {
        Self(date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64)
    }

    pub fn with_offset(self, extra: i64) -> Self {
        Self(self.0 + extra)
    }

    pub fn with_label(self, label: &str) -> Self {
        Self(self.0 + label_hash(label) as i64)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// One linear-congruential step mapped onto [0, 1).
    pub fn unit(self) -> f64 {
        let next = (self.0 as i128 * LCG_MULTIPLIER as i128 + LCG_INCREMENT as i128)
            .rem_euclid(LCG_MODULUS as i128);
        next as f64 / LCG_MODULUS as f64
    }

    /// Symmetric offset in [-half_width, half_width).
    pub fn jitter(self, half_width: f64) -> f64 {
        self.unit() * 2.0 * half_width - half_width
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
