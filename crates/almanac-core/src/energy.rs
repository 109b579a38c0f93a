//! Daily energy scores per life category.
//!
//! score = clamp(baseline + adjustment + jitter, 50, 95), rounded, where the
//! baseline follows the day of year, the adjustment is a per-category wave and
//! the jitter is one LCG step of a per-category seed.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarPosition;
use crate::constants::{ENERGY_JITTER, ENERGY_MAX, ENERGY_MIN};
use crate::content::{BandAdvice, EnergyAdvice};
use crate::date::CalendarDate;
use crate::seed::{Seed, label_hash};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyCategory {
    Overall,
    Love,
    Wealth,
    Career,
    Study,
}

impl EnergyCategory {
    pub const ALL: [EnergyCategory; 5] = [
        EnergyCategory::Overall,
        EnergyCategory::Love,
        EnergyCategory::Wealth,
        EnergyCategory::Career,
        EnergyCategory::Study,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EnergyCategory::Overall => "overall",
            EnergyCategory::Love => "love",
            EnergyCategory::Wealth => "wealth",
            EnergyCategory::Career => "career",
            EnergyCategory::Study => "study",
        }
    }

    fn adjustment(self, date: CalendarDate, ordinal: u16) -> f64 {
        let doy = date.day_of_year() as f64;
        match self {
            EnergyCategory::Overall => 0.0,
            EnergyCategory::Love => 3.0 * (TAU * date.month() as f64 / 12.0).sin(),
            EnergyCategory::Wealth => 4.0 * (TAU * date.day() as f64 / 31.0).cos(),
            EnergyCategory::Career => 3.0 * (TAU * ordinal as f64 / 260.0).sin(),
            EnergyCategory::Study => 4.0 * (TAU * doy / 365.0).cos(),
        }
    }

    fn advice(self, advice: &EnergyAdvice) -> &BandAdvice {
        match self {
            EnergyCategory::Overall => &advice.overall,
            EnergyCategory::Love => &advice.love,
            EnergyCategory::Wealth => &advice.wealth,
            EnergyCategory::Career => &advice.career,
            EnergyCategory::Study => &advice.study,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyBand {
    High,
    Steady,
    Low,
}

impl EnergyBand {
    pub fn of(score: u8) -> Self {
        match score {
            s if s >= 80 => EnergyBand::High,
            s if s >= 65 => EnergyBand::Steady,
            _ => EnergyBand::Low,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub category: EnergyCategory,
    pub score: u8,
    pub trend: Trend,
    pub intensity: u8,
    pub band: EnergyBand,
    pub advice: String,
}

/// `65 + 5·sin(2π·doy/365) + 5·((doy mod 30)/30)`
pub fn baseline(date: CalendarDate) -> f64 {
    let doy = date.day_of_year();
    let solar = (TAU * doy as f64 / 365.0).sin();
    let lunar = (doy % 30) as f64 / 30.0;
    65.0 + 5.0 * solar + 5.0 * lunar
}

pub fn reading(
    date: CalendarDate,
    position: CalendarPosition,
    category: EnergyCategory,
    advice: &EnergyAdvice,
) -> EnergyReading {
    let seed = Seed::from_date(date)
        .with_offset((label_hash(category.key()) % 1000) as i64 + position.ordinal as i64);
    let jitter = seed.jitter(ENERGY_JITTER);
    let raw = baseline(date) + category.adjustment(date, position.ordinal) + jitter;
    let score = raw.clamp(ENERGY_MIN, ENERGY_MAX).round() as u8;

    let band = EnergyBand::of(score);
    let texts = category.advice(advice);
    let advice = match band {
        EnergyBand::High => &texts.high,
        EnergyBand::Steady => &texts.steady,
        EnergyBand::Low => &texts.low,
    };

    EnergyReading {
        category,
        score,
        trend: if jitter > 0.0 { Trend::Rising } else { Trend::Falling },
        intensity: jitter.round().abs() as u8,
        band,
        advice: advice.clone(),
    }
}

/// Readings for every category, in [`EnergyCategory::ALL`] order.
pub fn readings(
    date: CalendarDate,
    position: CalendarPosition,
    advice: &EnergyAdvice,
) -> Vec<EnergyReading> {
    EnergyCategory::ALL
        .into_iter()
        .map(|c| reading(date, position, c, advice))
        .collect()
}
