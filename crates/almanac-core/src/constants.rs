/// Physical rhythm period in days.
pub const PHYSICAL_PERIOD: u32 = 23;

/// Emotional rhythm period in days.
pub const EMOTIONAL_PERIOD: u32 = 28;

/// Intellectual rhythm period in days.
pub const INTELLECTUAL_PERIOD: u32 = 33;

/// Amplitude scale: cycle values live in [-AMPLITUDE, AMPLITUDE].
pub const AMPLITUDE: f64 = 100.0;

/// Length of the cyclical calendar (13 × 20).
pub const CALENDAR_CYCLE: i64 = 260;

/// First sub-cycle (tones).
pub const SUB_CYCLE_A: i64 = 13;

/// Second sub-cycle (seals).
pub const SUB_CYCLE_B: i64 = 20;

/// Calendar anchor: 2025-09-23 is ordinal 183.
pub const ANCHOR_YEAR: i32 = 2025;
pub const ANCHOR_MONTH: u8 = 9;
pub const ANCHOR_DAY: u8 = 23;
pub const ANCHOR_ORDINAL: i64 = 183;

/// Classic Numerical Recipes LCG constants (mod 2^32).
pub const LCG_MULTIPLIER: i64 = 1_664_525;
pub const LCG_INCREMENT: i64 = 1_013_904_223;
pub const LCG_MODULUS: i64 = 1 << 32;

/// Energy scores: jitter half-width and the final clamp range.
pub const ENERGY_JITTER: f64 = 8.0;
pub const ENERGY_MIN: f64 = 50.0;
pub const ENERGY_MAX: f64 = 95.0;

/// Daily reading selection shape.
pub const SUGGESTION_COUNT: usize = 4;
pub const SUGGESTION_STRIDE: i64 = 17;
pub const AVOIDANCE_COUNT: usize = 3;
pub const AVOIDANCE_STRIDE: i64 = 23;
pub const AVOIDANCE_OFFSET: i64 = 100;
pub const LUCKY_NUMBER_OFFSET: i64 = 37;
pub const LUCKY_FOOD_OFFSET: i64 = 73;
pub const QUOTE_OFFSET: i64 = 41;
pub const SECONDARY_FIELD_OFFSET: i64 = 13;

/// Longest date range a cycle query may expand, in days.
pub const MAX_RANGE_DAYS: usize = 366;

/// Days covered by a weekly trend.
pub const TREND_DAYS: u32 = 7;

/// Food suggestion bounds.
pub const FOOD_MIN: usize = 3;
pub const FOOD_MAX: usize = 5;

/// Default history cap and the protected default anchor (1991-01-01).
pub const DEFAULT_HISTORY_CAP: usize = 6;
pub const DEFAULT_ANCHOR: (i32, u8, u8) = (1991, 1, 1);

/// Thirteen-moon year: starts 26 July, 28-day moons.
pub const MOON_YEAR_START: (u8, u8) = (7, 26);
pub const MOON_LENGTH: i64 = 28;
pub const MOON_COUNT: i64 = 13;

/// Zodiac base year (a rat year).
pub const ZODIAC_BASE_YEAR: i32 = 1900;

/// Label mixed into the date seed for the daily element roll.
pub const DAILY_ELEMENT_LABEL: &str = "daily-element";
