//! Engine configuration. Every field has a default, so an empty or partial
//! settings file is valid.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ANCHOR, DEFAULT_HISTORY_CAP};
use crate::cycle::{CyclePeriods, CycleWeights};
use crate::date::CalendarDate;
use crate::element::CompatibilityBands;
use crate::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub cap: usize,
    pub default_anchor: CalendarDate,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        let (year, month, day) = DEFAULT_ANCHOR;
        Self {
            cap: DEFAULT_HISTORY_CAP,
            default_anchor: CalendarDate::from_ymd_unchecked(year, month, day),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub periods: CyclePeriods,
    pub weights: CycleWeights,
    pub bands: CompatibilityBands,
    pub history: HistoryConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.periods.validate()?;
        self.weights.validate()?;
        self.bands.validate()?;
        if self.history.cap < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "history.cap must be at least 2, got {}",
                self.history.cap
            )));
        }
        Ok(())
    }
}
