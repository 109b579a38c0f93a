//! Static content tables.
//!
//! The engine treats every pool as an opaque ordered sequence and only ever
//! reads `pool[i]` and `len`. Tables are deserialized by the host (the store
//! crate ships a built-in set) and handed to [`crate::Engine`] at construction.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentPool<T>(Vec<T>);

impl<T> Default for ContentPool<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> ContentPool<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// Entry `i`, or `EmptyPool` naming `pool` when the table is too short.
    pub fn at(&self, i: usize, pool: &str) -> Result<&T> {
        self.0
            .get(i)
            .ok_or_else(|| EngineError::EmptyPool(format!("{pool} has no entry {i}")))
    }
}

impl<T> From<Vec<T>> for ContentPool<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

/// A value for each of the five elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByElement<T> {
    pub metal: T,
    pub wood: T,
    pub water: T,
    pub fire: T,
    pub earth: T,
}

impl<T> ByElement<T> {
    pub fn get(&self, element: Element) -> &T {
        match element {
            Element::Metal => &self.metal,
            Element::Wood => &self.wood,
            Element::Water => &self.water,
            Element::Fire => &self.fire,
            Element::Earth => &self.earth,
        }
    }
}

// --- Calendar ---

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    pub name: String,
    #[serde(default)]
    pub essence: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seal {
    pub name: String,
    #[serde(default)]
    pub quality: String,
    #[serde(default)]
    pub energy: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyField {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandAdvice {
    pub high: String,
    pub steady: String,
    pub low: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyAdvice {
    pub overall: BandAdvice,
    pub love: BandAdvice,
    pub wealth: BandAdvice,
    pub career: BandAdvice,
    pub study: BandAdvice,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarContent {
    pub tones: ContentPool<Tone>,
    pub seals: ContentPool<Seal>,
    pub moons: ContentPool<String>,
    pub suggestions: ContentPool<String>,
    pub avoidances: ContentPool<String>,
    pub default_suggestion: String,
    pub default_avoidance: String,
    pub lucky_colors: ContentPool<String>,
    pub lucky_numbers: ContentPool<u32>,
    pub lucky_foods: ContentPool<String>,
    pub messages: ContentPool<String>,
    pub quotes: ContentPool<String>,
    pub energy_fields: ContentPool<EnergyField>,
    pub energy_advice: EnergyAdvice,
}

// --- Dress ---

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSystem {
    pub name: String,
    pub element: Element,
    #[serde(default)]
    pub colors: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodLists {
    pub favor: Vec<String>,
    pub avoid: Vec<String>,
}

impl FoodLists {
    pub fn pick(&self, kind: FoodKind) -> &[String] {
        match kind {
            FoodKind::Favor => &self.favor,
            FoodKind::Avoid => &self.avoid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Favor,
    Avoid,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonFoods {
    pub spring: FoodLists,
    pub summer: FoodLists,
    pub autumn: FoodLists,
    pub winter: FoodLists,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialDayFoods {
    pub first: FoodLists,
    pub fifteenth: FoodLists,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DressContent {
    pub color_systems: ContentPool<ColorSystem>,
    pub star_colors: ContentPool<String>,
    /// Placeholders: `{relation}`, `{luck}`, `{focus}`, `{benefit}`.
    pub templates: ContentPool<String>,
    pub focus_words: ContentPool<String>,
    pub benefit_words: ContentPool<String>,
    /// Monday first.
    pub weekday_foods: ContentPool<FoodLists>,
    pub element_foods: ByElement<FoodLists>,
    pub season_foods: SeasonFoods,
    pub special_day_foods: SpecialDayFoods,
}

// --- Zodiac ---

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementGuidance {
    pub colors: Vec<String>,
    pub accessories: Vec<String>,
    pub industries: Vec<String>,
    pub directions: Vec<String>,
    pub boost: String,
    pub home: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZodiacContent {
    pub guidance: ByElement<ElementGuidance>,
    pub relationship_advice: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    pub calendar: CalendarContent,
    pub dress: DressContent,
    pub zodiac: ZodiacContent,
}

impl ContentTables {
    /// Names of required pools that are empty or too short.
    pub fn missing_pools(&self) -> Vec<&'static str> {
        let c = &self.calendar;
        let d = &self.dress;
        let checks = [
            ("calendar.tones", c.tones.len() >= 13),
            ("calendar.seals", c.seals.len() >= 20),
            ("calendar.moons", c.moons.len() >= 13),
            ("calendar.suggestions", !c.suggestions.is_empty()),
            ("calendar.avoidances", !c.avoidances.is_empty()),
            ("calendar.lucky_colors", !c.lucky_colors.is_empty()),
            ("calendar.lucky_numbers", !c.lucky_numbers.is_empty()),
            ("calendar.lucky_foods", !c.lucky_foods.is_empty()),
            ("calendar.messages", !c.messages.is_empty()),
            ("calendar.quotes", !c.quotes.is_empty()),
            ("calendar.energy_fields", c.energy_fields.len() >= 2),
            ("dress.color_systems", !d.color_systems.is_empty()),
            ("dress.star_colors", !d.star_colors.is_empty()),
            ("dress.templates", !d.templates.is_empty()),
            ("dress.focus_words", !d.focus_words.is_empty()),
            ("dress.benefit_words", !d.benefit_words.is_empty()),
            ("dress.weekday_foods", d.weekday_foods.len() >= 7),
        ];
        checks
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.missing_pools().is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ContentTables;

    /// The built-in tables shipped with the store crate.
    pub fn builtin() -> ContentTables {
        toml::from_str(include_str!("../../almanac-store/content/default.toml")).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_ready() {
        let tables = test_support::builtin();
        assert_eq!(tables.missing_pools(), Vec::<&str>::new());
        assert!(tables.is_ready());
        assert_eq!(tables.calendar.tones.len(), 13);
        assert_eq!(tables.calendar.seals.len(), 20);
    }

    #[test]
    fn test_empty_tables_report_every_pool() {
        let tables = ContentTables::default();
        assert!(!tables.is_ready());
        assert!(tables.missing_pools().contains(&"calendar.tones"));
        assert!(tables.missing_pools().contains(&"dress.weekday_foods"));
    }

    #[test]
    fn test_pool_at_out_of_range() {
        let pool: ContentPool<String> = vec!["a".to_string()].into();
        assert_eq!(pool.at(0, "p").unwrap(), "a");
        assert!(matches!(pool.at(1, "p"), Err(EngineError::EmptyPool(_))));
    }

    #[test]
    fn test_color_system_rejects_unknown_element() {
        let raw = r#"{"name": "teal", "element": "aether"}"#;
        assert!(serde_json::from_str::<ColorSystem>(raw).is_err());
    }
}
