//! The five-element graph: two disjoint directed 5-cycles.
//!
//! generates: Metal → Water → Wood → Fire → Earth → Metal
//! overcomes: Metal → Wood → Earth → Water → Fire → Metal

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DAILY_ELEMENT_LABEL;
use crate::date::CalendarDate;
use crate::error::{EngineError, Result};
use crate::seed::Seed;
use crate::selector::pick_index;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

/// Element of each weekday, Monday first.
pub const WEEKDAY_ELEMENTS: [Element; 7] = [
    Element::Metal,
    Element::Wood,
    Element::Water,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Wood,
];

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    pub fn generates(self) -> Element {
        match self {
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
        }
    }

    /// The element that generates this one.
    pub fn generated_by(self) -> Element {
        Element::ALL
            .into_iter()
            .find(|e| e.generates() == self)
            .unwrap_or(self)
    }

    pub fn overcomes(self) -> Element {
        match self {
            Element::Metal => Element::Wood,
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Metal => "metal",
            Element::Wood => "wood",
            Element::Water => "water",
            Element::Fire => "fire",
            Element::Earth => "earth",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Element::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownElement(s.to_string()))
    }
}

/// How `to` stands as seen from `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Same,
    Generates,
    GeneratedBy,
    Overcomes,
    OvercomeBy,
    Unrelated,
}

impl Relation {
    /// Every ordered pair of distinct elements is joined by exactly one edge,
    /// so this never yields `Unrelated`.
    pub fn between(from: Element, to: Element) -> Self {
        if from == to {
            Relation::Same
        } else if from.generates() == to {
            Relation::Generates
        } else if to.generates() == from {
            Relation::GeneratedBy
        } else if from.overcomes() == to {
            Relation::Overcomes
        } else if to.overcomes() == from {
            Relation::OvercomeBy
        } else {
            Relation::Unrelated
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Relation::Same => "shares its element with",
            Relation::Generates => "feeds",
            Relation::GeneratedBy => "is fed by",
            Relation::Overcomes => "restrains",
            Relation::OvercomeBy => "is restrained by",
            Relation::Unrelated => "stands apart from",
        }
    }
}

/// Compatibility score for each relation tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatibilityBands {
    pub same: u8,
    pub generates: u8,
    pub generated_by: u8,
    pub overcomes: u8,
    pub overcome_by: u8,
    pub unrelated: u8,
}

impl Default for CompatibilityBands {
    fn default() -> Self {
        Self {
            same: 85,
            generates: 95,
            generated_by: 80,
            overcomes: 30,
            overcome_by: 40,
            unrelated: 50,
        }
    }
}

impl CompatibilityBands {
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.same,
            self.generates,
            self.generated_by,
            self.overcomes,
            self.overcome_by,
            self.unrelated,
        ];
        if all.iter().any(|s| *s > 100) {
            return Err(EngineError::InvalidConfig(format!(
                "compatibility scores must be within 0..=100: {all:?}"
            )));
        }
        Ok(())
    }

    pub fn score(&self, relation: Relation) -> u8 {
        match relation {
            Relation::Same => self.same,
            Relation::Generates => self.generates,
            Relation::GeneratedBy => self.generated_by,
            Relation::Overcomes => self.overcomes,
            Relation::OvercomeBy => self.overcome_by,
            Relation::Unrelated => self.unrelated,
        }
    }
}

/// A resolved relation lookup with its compatibility score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRelation {
    pub from: Element,
    pub to: Element,
    pub relation: Relation,
    pub score: u8,
    pub summary: String,
}

impl ElementRelation {
    pub fn resolve(from: Element, to: Element, bands: &CompatibilityBands) -> Self {
        let relation = Relation::between(from, to);
        Self {
            from,
            to,
            relation,
            score: bands.score(relation),
            summary: format!("{from} {} {to}", relation.phrase()),
        }
    }
}

/// The plain weekday element, with no per-date override.
pub fn weekday_element(date: CalendarDate) -> Element {
    WEEKDAY_ELEMENTS[date.weekday().index()]
}

/// Daily element: the weekday element, overridden by a seeded pick among
/// the other four. The roll is `(date seed + hash(label)) mod 5`; zero keeps
/// the weekday element, `r > 0` takes the `r`-th remaining element in
/// [`Element::ALL`] order. The date seed advances daily, so dates seven days
/// apart within a month never share a roll.
pub fn daily_element(date: CalendarDate) -> Element {
    let base = weekday_element(date);
    let seed = Seed::from_date(date).with_label(DAILY_ELEMENT_LABEL);
    let roll = pick_index(seed.value(), 0, Element::ALL.len(), "elements").unwrap_or(0);
    if roll == 0 {
        return base;
    }
    Element::ALL
        .into_iter()
        .filter(|e| *e != base)
        .nth(roll - 1)
        .unwrap_or(base)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];

    /// 1900 was a rat year.
    pub fn from_year(year: i32) -> Self {
        let idx = (year as i64 - crate::constants::ZODIAC_BASE_YEAR as i64).rem_euclid(12);
        Zodiac::ALL[idx as usize]
    }

    pub fn element(self) -> Element {
        match self {
            Zodiac::Monkey | Zodiac::Rooster => Element::Metal,
            Zodiac::Tiger | Zodiac::Rabbit => Element::Wood,
            Zodiac::Rat | Zodiac::Pig => Element::Water,
            Zodiac::Snake | Zodiac::Horse => Element::Fire,
            Zodiac::Ox | Zodiac::Dragon | Zodiac::Goat | Zodiac::Dog => Element::Earth,
        }
    }

    pub fn of_element(element: Element) -> Vec<Zodiac> {
        Zodiac::ALL
            .into_iter()
            .filter(|z| z.element() == element)
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Zodiac::Rat => "rat",
            Zodiac::Ox => "ox",
            Zodiac::Tiger => "tiger",
            Zodiac::Rabbit => "rabbit",
            Zodiac::Dragon => "dragon",
            Zodiac::Snake => "snake",
            Zodiac::Horse => "horse",
            Zodiac::Goat => "goat",
            Zodiac::Monkey => "monkey",
            Zodiac::Rooster => "rooster",
            Zodiac::Dog => "dog",
            Zodiac::Pig => "pig",
        }
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zodiac {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Zodiac::ALL
            .into_iter()
            .find(|z| z.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownElement(format!("zodiac animal '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_cycles_are_closed() {
        for e in Element::ALL {
            let mut g = e;
            let mut o = e;
            for _ in 0..5 {
                g = g.generates();
                o = o.overcomes();
            }
            assert_eq!(g, e);
            assert_eq!(o, e);
            assert_ne!(e.generates(), e.overcomes());
            assert_eq!(e.generates().generated_by(), e);
        }
    }

    #[test]
    fn test_relation_tags() {
        use Element::*;
        assert_eq!(Relation::between(Metal, Metal), Relation::Same);
        assert_eq!(Relation::between(Metal, Water), Relation::Generates);
        assert_eq!(Relation::between(Water, Metal), Relation::GeneratedBy);
        assert_eq!(Relation::between(Metal, Wood), Relation::Overcomes);
        assert_eq!(Relation::between(Wood, Metal), Relation::OvercomeBy);
    }

    #[test]
    fn test_every_pair_has_an_edge() {
        for a in Element::ALL {
            for b in Element::ALL {
                assert_ne!(Relation::between(a, b), Relation::Unrelated);
            }
        }
    }

    #[test]
    fn test_unknown_element() {
        assert!(matches!("aether".parse::<Element>(), Err(EngineError::UnknownElement(_))));
        assert_eq!(" Water ".parse::<Element>().unwrap(), Element::Water);
        assert_eq!("Fire".parse::<Element>().unwrap(), Element::Fire);
    }

    #[test]
    fn test_resolved_relation_carries_score() {
        let r = ElementRelation::resolve(Element::Fire, Element::Metal, &CompatibilityBands::default());
        assert_eq!(r.relation, Relation::Overcomes);
        assert_eq!(r.score, 30);
        assert_eq!(r.summary, "fire restrains metal");
    }

    #[test]
    fn test_default_bands() {
        let bands = CompatibilityBands::default();
        assert_eq!(bands.score(Relation::Same), 85);
        assert_eq!(bands.score(Relation::Generates), 95);
        assert_eq!(bands.score(Relation::GeneratedBy), 80);
        assert_eq!(bands.score(Relation::Overcomes), 30);
        assert_eq!(bands.score(Relation::OvercomeBy), 40);
        assert_eq!(bands.score(Relation::Unrelated), 50);
    }

    #[test]
    fn test_relation_serializes_camel_case() {
        assert_eq!(serde_json::to_string(&Relation::GeneratedBy).unwrap(), "\"generatedBy\"");
    }

    #[test]
    fn test_daily_element() {
        // label hash 706_197_320; 20_250_922 + 706_197_320 = 726_448_242 → roll 2
        assert_eq!(weekday_element(date("2025-09-22")), Element::Metal);
        assert_eq!(daily_element(date("2025-09-22")), Element::Water);
        // roll 3 of [metal, water, fire, earth]
        assert_eq!(daily_element(date("2025-09-23")), Element::Fire);
        // roll 0 keeps the weekday element
        assert_eq!(daily_element(date("2026-01-05")), Element::Metal);
    }

    #[test]
    fn test_same_weekday_dates_diverge() {
        let mondays: Vec<Element> = ["2026-01-05", "2026-01-12", "2026-01-19", "2026-01-26"]
            .into_iter()
            .map(|d| daily_element(date(d)))
            .collect();
        assert_eq!(
            mondays,
            vec![Element::Metal, Element::Water, Element::Earth, Element::Wood]
        );

        let start = date("2026-01-05");
        let mut seen = std::collections::HashSet::new();
        for week in 0..52 {
            let d = start.add_days(week * 7);
            if d.month() == d.add_days(7).month() {
                assert_ne!(daily_element(d), daily_element(d.add_days(7)), "{d}");
            }
            seen.insert(daily_element(d));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_daily_element_override_excludes_base() {
        for d in CalendarDate::range(date("2026-01-01"), date("2026-12-31")) {
            let roll = Seed::from_date(d).with_label(DAILY_ELEMENT_LABEL).value() % 5;
            assert_eq!(daily_element(d) == weekday_element(d), roll == 0, "{d}");
        }
    }

    #[test]
    fn test_zodiac_from_year() {
        assert_eq!(Zodiac::from_year(1900), Zodiac::Rat);
        assert_eq!(Zodiac::from_year(1991), Zodiac::Goat);
        assert_eq!(Zodiac::from_year(2024), Zodiac::Dragon);
        assert_eq!(Zodiac::from_year(1899), Zodiac::Pig);
        assert_eq!(Zodiac::of_element(Element::Earth).len(), 4);
        assert!(matches!("unicorn".parse::<Zodiac>(), Err(EngineError::UnknownElement(_))));
    }
}
