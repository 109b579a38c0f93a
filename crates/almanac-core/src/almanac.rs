//! Composed readings: the daily calendar page, the birth chart and the
//! zodiac energy guidance.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarPosition, MoonDate, SeasonalMarker};
use crate::constants::{
    AVOIDANCE_COUNT, AVOIDANCE_OFFSET, AVOIDANCE_STRIDE, LUCKY_FOOD_OFFSET, LUCKY_NUMBER_OFFSET,
    QUOTE_OFFSET, SECONDARY_FIELD_OFFSET, SUGGESTION_COUNT, SUGGESTION_STRIDE,
};
use crate::content::{
    ByElement, CalendarContent, ElementGuidance, EnergyField, FoodLists, ZodiacContent,
};
use crate::date::{CalendarDate, Weekday};
use crate::element::{CompatibilityBands, Element, Relation, Zodiac, weekday_element};
use crate::energy::{self, EnergyReading};
use crate::error::{EngineError, Result};
use crate::seed::Seed;
use crate::selector::{pick_index, select_padded};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyItems {
    pub color: String,
    pub number: u32,
    pub food: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonInfo {
    pub moon: u8,
    pub day: u8,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub position: CalendarPosition,
    pub tone_name: String,
    pub seal_name: String,
    pub full_name: String,
    pub moon: MoonInfo,
    pub suggestions: Vec<String>,
    pub avoidances: Vec<String>,
    pub lucky: LuckyItems,
    pub message: String,
    pub quote: String,
    pub energy: Vec<EnergyReading>,
    pub seasonal_marker: Option<SeasonalMarker>,
}

fn names(position: CalendarPosition, content: &CalendarContent) -> Result<(String, String)> {
    let tone = content.tones.at(position.tone as usize, "calendar.tones")?;
    let seal = content.seals.at(position.seal as usize, "calendar.seals")?;
    Ok((tone.name.clone(), seal.name.clone()))
}

/// The daily calendar page for `date`. Every pick is seeded by
/// `date seed + ordinal`.
pub fn calendar_info(date: CalendarDate, content: &CalendarContent) -> Result<CalendarInfo> {
    let position = CalendarPosition::resolve(date);
    let (tone_name, seal_name) = names(position, content)?;
    let seed = Seed::from_date(date).with_offset(position.ordinal as i64).value();

    let suggestions = select_padded(
        content.suggestions.as_slice(),
        seed,
        0,
        SUGGESTION_STRIDE,
        SUGGESTION_COUNT,
        &content.default_suggestion,
        "calendar.suggestions",
    )?;
    let avoidances = select_padded(
        content.avoidances.as_slice(),
        seed,
        AVOIDANCE_OFFSET,
        AVOIDANCE_STRIDE,
        AVOIDANCE_COUNT,
        &content.default_avoidance,
        "calendar.avoidances",
    )?;

    let pick = |offset: i64, len: usize, pool: &str| pick_index(seed, offset, len, pool);
    let lucky = LuckyItems {
        color: content
            .lucky_colors
            .at(pick(0, content.lucky_colors.len(), "calendar.lucky_colors")?, "calendar.lucky_colors")?
            .clone(),
        number: *content.lucky_numbers.at(
            pick(LUCKY_NUMBER_OFFSET, content.lucky_numbers.len(), "calendar.lucky_numbers")?,
            "calendar.lucky_numbers",
        )?,
        food: content
            .lucky_foods
            .at(
                pick(LUCKY_FOOD_OFFSET, content.lucky_foods.len(), "calendar.lucky_foods")?,
                "calendar.lucky_foods",
            )?
            .clone(),
    };
    let message = content
        .messages
        .at(pick(0, content.messages.len(), "calendar.messages")?, "calendar.messages")?
        .clone();
    let quote = content
        .quotes
        .at(pick(QUOTE_OFFSET, content.quotes.len(), "calendar.quotes")?, "calendar.quotes")?
        .clone();

    let moon_date = MoonDate::of(date);
    let moon = MoonInfo {
        moon: moon_date.moon,
        day: moon_date.day,
        name: content
            .moons
            .at(moon_date.moon as usize - 1, "calendar.moons")?
            .clone(),
    };

    Ok(CalendarInfo {
        date,
        weekday: date.weekday(),
        position,
        full_name: format!("{tone_name} {seal_name}"),
        tone_name,
        seal_name,
        moon,
        suggestions,
        avoidances,
        lucky,
        message,
        quote,
        energy: energy::readings(date, position, &content.energy_advice),
        seasonal_marker: SeasonalMarker::for_date(date),
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthChart {
    pub date: CalendarDate,
    pub weekday: Weekday,
    pub position: CalendarPosition,
    pub tone_name: String,
    pub seal_name: String,
    pub full_name: String,
    pub purpose: String,
    pub strengths: Vec<String>,
    pub primary_field: EnergyField,
    pub secondary_field: EnergyField,
    pub balance: String,
}

/// Chart for an anchor date. The primary field is `fields[ordinal mod n]`;
/// the secondary is drawn from the rest at `(day number + ordinal + 13)`.
pub fn birth_chart(date: CalendarDate, content: &CalendarContent) -> Result<BirthChart> {
    let position = CalendarPosition::resolve(date);
    let (tone_name, seal_name) = names(position, content)?;
    let tone = content.tones.at(position.tone as usize, "calendar.tones")?;
    let seal = content.seals.at(position.seal as usize, "calendar.seals")?;

    let fields = content.energy_fields.as_slice();
    if fields.len() < 2 {
        return Err(EngineError::EmptyPool(
            "calendar.energy_fields needs at least two entries".to_string(),
        ));
    }
    let primary_idx = pick_index(position.ordinal as i64, 0, fields.len(), "calendar.energy_fields")?;
    let primary = fields[primary_idx].clone();
    let remaining: Vec<&EnergyField> = fields
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != primary_idx)
        .map(|(_, f)| f)
        .collect();
    let secondary_idx = pick_index(
        date.day_number() + position.ordinal as i64,
        SECONDARY_FIELD_OFFSET,
        remaining.len(),
        "calendar.energy_fields",
    )?;
    let secondary = remaining[secondary_idx].clone();

    let strengths = [seal.quality.as_str(), seal.energy.as_str(), tone.essence.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(BirthChart {
        date,
        weekday: date.weekday(),
        position,
        full_name: format!("{tone_name} {seal_name}"),
        purpose: format!(
            "{tone_name} {seal_name}: grow through {} by way of {}",
            non_empty(&seal.quality, &seal_name),
            non_empty(&tone.action, &tone_name),
        ),
        tone_name,
        seal_name,
        strengths,
        balance: format!(
            "Balance {} with {} to reach your full range",
            primary.name, secondary.name
        ),
        primary_field: primary,
        secondary_field: secondary,
    })
}

fn non_empty<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    if text.is_empty() { fallback } else { text }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyMatch {
    pub score: u8,
    pub relation: Relation,
    pub user_element: Element,
    pub daily_element: Element,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyGuidance {
    pub date: CalendarDate,
    pub zodiac: Zodiac,
    pub user_element: Element,
    pub daily_element: Element,
    pub energy_match: EnergyMatch,
    pub lifestyle: ElementGuidance,
    pub foods: FoodLists,
    pub compatible_elements: Vec<Element>,
    pub compatible_zodiacs: Vec<Zodiac>,
    pub relationship_advice: String,
}

/// Guidance for a zodiac animal on `date`, judged against the plain weekday
/// element. The compatible element is the one that generates the animal's.
pub fn energy_guidance(
    zodiac: Zodiac,
    date: CalendarDate,
    bands: &CompatibilityBands,
    zodiac_content: &ZodiacContent,
    element_foods: &ByElement<FoodLists>,
) -> EnergyGuidance {
    let user = zodiac.element();
    let daily = weekday_element(date);
    let relation = Relation::between(user, daily);
    let compatible = user.generated_by();

    EnergyGuidance {
        date,
        zodiac,
        user_element: user,
        daily_element: daily,
        energy_match: EnergyMatch {
            score: bands.score(relation),
            relation,
            user_element: user,
            daily_element: daily,
        },
        lifestyle: zodiac_content.guidance.get(user).clone(),
        foods: element_foods.get(user).clone(),
        compatible_elements: vec![compatible],
        compatible_zodiacs: Zodiac::of_element(compatible),
        relationship_advice: zodiac_content.relationship_advice.clone(),
    }
}
