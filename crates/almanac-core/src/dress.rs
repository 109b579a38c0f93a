//! Dress colours and food suggestions for a date.
//!
//! Colour systems are judged by the relation of their element to the daily
//! element. Foods are drawn from several lists (weekday, element, season,
//! special day) and ordered by a seeded hash so the same date always yields
//! the same list.

use serde::{Deserialize, Serialize};

use crate::constants::{FOOD_MAX, FOOD_MIN};
use crate::content::{ColorSystem, DressContent, FoodKind, FoodLists};
use crate::date::{CalendarDate, Weekday};
use crate::element::{Element, Relation, daily_element};
use crate::error::Result;
use crate::seed::{Seed, label_hash};
use crate::selector::{hash_order, pick_index};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Luck {
    Auspicious,
    Neutral,
    Inauspicious,
}

impl Luck {
    /// Base luck of a colour whose element stands in `relation` to the day.
    pub fn from_relation(relation: Relation) -> Self {
        match relation {
            Relation::Same | Relation::Generates | Relation::GeneratedBy => Luck::Auspicious,
            Relation::OvercomeBy => Luck::Inauspicious,
            Relation::Overcomes | Relation::Unrelated => Luck::Neutral,
        }
    }

    /// About one seed in ten softens the verdict.
    pub fn vary(self, seed: i64) -> Self {
        if seed.rem_euclid(100) >= 10 {
            return self;
        }
        match self {
            Luck::Auspicious | Luck::Inauspicious => Luck::Neutral,
            Luck::Neutral if seed.rem_euclid(2) == 0 => Luck::Auspicious,
            Luck::Neutral => Luck::Inauspicious,
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Luck::Auspicious => "auspicious",
            Luck::Neutral => "neutral",
            Luck::Inauspicious => "inauspicious",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSuggestion {
    pub system: String,
    pub colors: Vec<String>,
    pub element: Element,
    pub relation: Relation,
    pub luck: Luck,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSuggestions {
    pub favor: Vec<String>,
    pub avoid: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DressSuggestion {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub daily_element: Element,
    pub color_suggestions: Vec<ColorSuggestion>,
    pub recommended_systems: Vec<String>,
    pub star_color: String,
    pub food_suggestions: FoodSuggestions,
}

pub fn dress_suggestion(date: CalendarDate, content: &DressContent) -> Result<DressSuggestion> {
    let daily = daily_element(date);

    let color_suggestions = content
        .color_systems
        .as_slice()
        .iter()
        .map(|system| color_suggestion(date, daily, system, content))
        .collect::<Result<Vec<_>>>()?;

    let star_color = star_color(date, content)?;
    let mut recommended_systems: Vec<String> = content
        .color_systems
        .as_slice()
        .iter()
        .filter(|s| {
            matches!(
                Relation::between(daily, s.element),
                Relation::Same | Relation::Generates | Relation::GeneratedBy
            )
        })
        .map(|s| s.name.clone())
        .collect();
    if !recommended_systems.contains(&star_color) {
        recommended_systems.push(star_color.clone());
    }

    Ok(DressSuggestion {
        date,
        weekday: date.weekday(),
        daily_element: daily,
        color_suggestions,
        recommended_systems,
        star_color,
        food_suggestions: food_suggestions(date, daily, content),
    })
}

fn color_suggestion(
    date: CalendarDate,
    daily: Element,
    system: &ColorSystem,
    content: &DressContent,
) -> Result<ColorSuggestion> {
    let relation = Relation::between(daily, system.element);
    let seed = Seed::from_date(date).with_label(&system.name).value();
    let luck = Luck::from_relation(relation).vary(seed);

    let template = content
        .templates
        .at(pick_index(seed, 0, content.templates.len(), "dress.templates")?, "dress.templates")?;
    let focus = content.focus_words.at(
        pick_index(seed, 0, content.focus_words.len(), "dress.focus_words")?,
        "dress.focus_words",
    )?;
    let benefit = content.benefit_words.at(
        pick_index(seed, 0, content.benefit_words.len(), "dress.benefit_words")?,
        "dress.benefit_words",
    )?;
    let description = template
        .replace("{relation}", relation.phrase())
        .replace("{luck}", luck.word())
        .replace("{focus}", focus)
        .replace("{benefit}", benefit);

    Ok(ColorSuggestion {
        system: system.name.clone(),
        colors: system.colors.clone(),
        element: system.element,
        relation,
        luck,
        description,
    })
}

/// `star_colors[(doy + day·month) mod len]`
pub fn star_color(date: CalendarDate, content: &DressContent) -> Result<String> {
    let key = date.day_of_year() as i64 + date.day() as i64 * date.month() as i64;
    let idx = pick_index(key, 0, content.star_colors.len(), "dress.star_colors")?;
    Ok(content.star_colors.at(idx, "dress.star_colors")?.clone())
}

/// Quarter weights for January–March, April–June, July–September and
/// October–December.
const SEASON_MULTIPLIERS: [f64; 4] = [0.8, 1.2, 1.5, 1.1];

fn season_multiplier(month: u8) -> f64 {
    SEASON_MULTIPLIERS[((month - 1) / 3) as usize]
}

fn seasonal_lists(month: u8, content: &DressContent) -> &FoodLists {
    let seasons = &content.season_foods;
    match month {
        3..=5 => &seasons.spring,
        6..=8 => &seasons.summer,
        9..=11 => &seasons.autumn,
        _ => &seasons.winter,
    }
}

fn special_day_lists(day: u8, content: &DressContent) -> Option<&FoodLists> {
    match day {
        1 => Some(&content.special_day_foods.first),
        15 => Some(&content.special_day_foods.fifteenth),
        _ => None,
    }
}

/// Items of `pool` that contain, or are contained in, any of `hints`.
fn matching<'a>(pool: &'a [String], hints: &[String]) -> Vec<&'a str> {
    pool.iter()
        .filter(|food| {
            hints
                .iter()
                .any(|h| food.contains(h.as_str()) || h.contains(food.as_str()))
        })
        .map(String::as_str)
        .collect()
}

fn push_unique(out: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
}

/// Seeds for one food list: base, element, season, special day, cap and
/// top-up.
struct FoodSeeds {
    base: u32,
    element: u32,
    season: u32,
    special: u32,
    cap: u32,
    top_up: u32,
}

pub fn food_suggestions(date: CalendarDate, daily: Element, content: &DressContent) -> FoodSuggestions {
    let base = Seed::from_date(date).value();
    let good_1 = label_hash(&format!("{base}-good-1"));
    let good_2 = label_hash(&format!("{base}-good-2"));
    let bad_1 = label_hash(&format!("{base}-bad-1"));
    let bad_2 = label_hash(&format!("{base}-bad-2"));
    let special = label_hash(&format!("{base}-special-{}", date.day_of_year()));

    let favor = food_list(
        date,
        daily,
        content,
        FoodKind::Favor,
        FoodSeeds {
            base: good_1,
            element: good_2,
            season: bad_1,
            special,
            cap: good_1,
            top_up: special,
        },
    );
    let avoid = food_list(
        date,
        daily,
        content,
        FoodKind::Avoid,
        FoodSeeds {
            base: bad_1,
            element: bad_2,
            season: good_1,
            special: good_2,
            cap: good_2,
            top_up: good_1,
        },
    );
    FoodSuggestions { favor, avoid }
}

fn food_list(
    date: CalendarDate,
    daily: Element,
    content: &DressContent,
    kind: FoodKind,
    seeds: FoodSeeds,
) -> Vec<String> {
    // Union of every weekday list, first occurrence wins.
    let mut pool: Vec<String> = Vec::new();
    for lists in content.weekday_foods.as_slice() {
        push_unique(&mut pool, lists.pick(kind).to_vec());
    }

    let weekday_lists = content
        .weekday_foods
        .as_slice()
        .get(date.weekday().index())
        .map(|l| l.pick(kind))
        .unwrap_or_default();
    let multiplier = season_multiplier(date.month());
    let element_hints = content.element_foods.get(daily).pick(kind);
    let season_hints = seasonal_lists(date.month(), content).pick(kind);

    let mut out = Vec::new();
    let take = |weight: f64| (weight * multiplier).floor() as usize;
    push_unique(&mut out, hash_order(weekday_lists, seeds.base, take(2.0)));
    push_unique(
        &mut out,
        hash_order(&matching(&pool, element_hints), seeds.element, take(1.5)),
    );
    push_unique(
        &mut out,
        hash_order(&matching(&pool, season_hints), seeds.season, take(1.2)),
    );
    if let Some(lists) = special_day_lists(date.day(), content) {
        push_unique(
            &mut out,
            hash_order(&matching(&pool, lists.pick(kind)), seeds.special, 1),
        );
    }

    if out.len() > FOOD_MAX {
        out = hash_order(&out, seeds.cap, FOOD_MAX);
    }
    if out.len() < FOOD_MIN {
        let remaining: Vec<&String> = pool.iter().filter(|f| !out.contains(f)).collect();
        let extra = hash_order(&remaining, seeds.top_up, FOOD_MIN - out.len());
        out.extend(extra);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::test_support::builtin;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_base_luck() {
        assert_eq!(Luck::from_relation(Relation::Same), Luck::Auspicious);
        assert_eq!(Luck::from_relation(Relation::Generates), Luck::Auspicious);
        assert_eq!(Luck::from_relation(Relation::GeneratedBy), Luck::Auspicious);
        assert_eq!(Luck::from_relation(Relation::Overcomes), Luck::Neutral);
        assert_eq!(Luck::from_relation(Relation::OvercomeBy), Luck::Inauspicious);
    }

    #[test]
    fn test_luck_variation() {
        assert_eq!(Luck::Auspicious.vary(10), Luck::Auspicious);
        assert_eq!(Luck::Auspicious.vary(105), Luck::Neutral);
        assert_eq!(Luck::Inauspicious.vary(209), Luck::Neutral);
        assert_eq!(Luck::Neutral.vary(4), Luck::Auspicious);
        assert_eq!(Luck::Neutral.vary(3), Luck::Inauspicious);
        assert_eq!(Luck::Neutral.vary(50), Luck::Neutral);
    }

    #[test]
    fn test_season_multiplier_quarters() {
        assert_eq!(season_multiplier(1), 0.8);
        assert_eq!(season_multiplier(4), 1.2);
        assert_eq!(season_multiplier(9), 1.5);
        assert_eq!(season_multiplier(12), 1.1);
    }

    #[test]
    fn test_matching_is_bidirectional_substring() {
        let pool = vec!["black sesame".to_string(), "pear".to_string(), "tofu".to_string()];
        let hints = vec!["sesame".to_string(), "pears".to_string()];
        assert_eq!(matching(&pool, &hints), vec!["black sesame", "pear"]);
    }

    #[test]
    fn test_dress_suggestion_shape() {
        let content = builtin().dress;
        let d = date("2025-09-23");
        let s = dress_suggestion(d, &content).unwrap();
        assert_eq!(s.daily_element, daily_element(d));
        assert_eq!(s.color_suggestions.len(), content.color_systems.len());
        assert!(s.recommended_systems.contains(&s.star_color));
        for c in &s.color_suggestions {
            assert_eq!(c.relation, Relation::between(s.daily_element, c.element));
            assert!(!c.description.contains('{'), "unfilled template: {}", c.description);
        }
    }

    #[test]
    fn test_food_bounds_and_uniqueness() {
        let content = builtin().dress;
        for d in CalendarDate::range(date("2025-01-01"), date("2025-12-31")) {
            let f = food_suggestions(d, daily_element(d), &content);
            for list in [&f.favor, &f.avoid] {
                assert!((FOOD_MIN..=FOOD_MAX).contains(&list.len()), "{d}: {list:?}");
                let mut sorted = list.clone();
                sorted.sort();
                sorted.dedup();
                assert_eq!(sorted.len(), list.len(), "{d}: duplicate in {list:?}");
            }
        }
    }

    #[test]
    fn test_dress_is_deterministic() {
        let content = builtin().dress;
        let d = date("2024-02-15");
        assert_eq!(dress_suggestion(d, &content).unwrap(), dress_suggestion(d, &content).unwrap());
    }

    #[test]
    fn test_empty_templates_is_empty_pool() {
        let mut content = builtin().dress;
        content.templates = Default::default();
        assert!(matches!(
            dress_suggestion(date("2025-09-23"), &content),
            Err(crate::EngineError::EmptyPool(_))
        ));
    }
}
