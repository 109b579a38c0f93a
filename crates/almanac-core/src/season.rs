//! Seasonal health guidance.
//!
//! The year is split into five seasons on fixed solar-term dates, each
//! ruled by one element. The day is split into twelve two-hour windows of
//! the organ clock, the first running 23:00–01:00.

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::element::Element;
use crate::error::{EngineError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    LateSummer,
    Autumn,
    Winter,
}

impl Season {
    /// Spring from 02-04, summer from 05-05, late summer from 08-07,
    /// autumn from 09-07, winter from 11-07.
    pub fn of(date: CalendarDate) -> Self {
        match (date.month(), date.day()) {
            md if md >= (11, 7) || md < (2, 4) => Season::Winter,
            md if md >= (9, 7) => Season::Autumn,
            md if md >= (8, 7) => Season::LateSummer,
            md if md >= (5, 5) => Season::Summer,
            _ => Season::Spring,
        }
    }

    pub fn element(self) -> Element {
        match self {
            Season::Spring => Element::Wood,
            Season::Summer => Element::Fire,
            Season::LateSummer => Element::Earth,
            Season::Autumn => Element::Metal,
            Season::Winter => Element::Water,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::LateSummer => "late summer",
            Season::Autumn => "autumn",
            Season::Winter => "winter",
        }
    }

    fn organs(self) -> &'static str {
        match self {
            Season::Spring => "liver, gallbladder",
            Season::Summer => "heart, small intestine",
            Season::LateSummer => "spleen, stomach",
            Season::Autumn => "lungs, large intestine",
            Season::Winter => "kidneys, bladder",
        }
    }

    fn character(self) -> &'static str {
        match self {
            Season::Spring => "Rising and spreading. Energy pushes outward like new shoots; keep things flowing.",
            Season::Summer => "Growth at its height. Circulation and metabolism run fast; keep the heart calm and cool.",
            Season::LateSummer => "Transformation. Damp peaks and digestion carries the load; keep the middle dry and light.",
            Season::Autumn => "Gathering in. Energy draws inward and the air turns dry; protect the lungs and stay moist.",
            Season::Winter => "Storing. Energy sinks deep; the season for rest, repair and saving strength.",
        }
    }

    fn advice(self) -> [&'static str; 4] {
        match self {
            Season::Spring => [
                "Sleep by 23:00 and rise early with the light.",
                "Walk, jog or stretch outdoors to keep energy moving.",
                "Let frustration pass quickly; stay cheerful.",
                "Favour greens and sprouts; go easy on sour, astringent food.",
            ],
            Season::Summer => [
                "Go to bed a little later but still rise early.",
                "Take some sun, avoiding the midday glare, and let sweat flow.",
                "Keep a level mood; a short midday rest steadies the heart.",
                "Add bitter greens and red foods; cut back on salt.",
            ],
            Season::LateSummer => [
                "Keep regular hours and resist chilling yourself.",
                "Keep living spaces dry and airy.",
                "Eat plain, warm, yellow foods such as millet, pumpkin and yam.",
                "Move moderately, but not hard in muggy heat.",
            ],
            Season::Autumn => [
                "Sleep early and rise early.",
                "Keep calm; let sadness pass without dwelling on it.",
                "Drink more water and eat pears, lilies and lotus seeds.",
                "Add layers gradually so the body adapts to the cool.",
            ],
            Season::Winter => [
                "Sleep early, rise with the sun, and get plenty of rest.",
                "Keep head, back and feet warm without overheating rooms.",
                "Avoid emotional extremes; conserve energy.",
                "Eat warming dark foods such as black beans, sesame and walnuts.",
            ],
        }
    }
}

/// One two-hour window of the organ clock. `end_hour` wraps past midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrganWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    pub organ: &'static str,
    pub description: &'static str,
    pub suggestion: &'static str,
    pub health_tip: &'static str,
}

const fn window(
    start_hour: u8,
    organ: &'static str,
    description: &'static str,
    suggestion: &'static str,
    health_tip: &'static str,
) -> OrganWindow {
    OrganWindow {
        start_hour,
        end_hour: (start_hour + 2) % 24,
        organ,
        description,
        suggestion,
        health_tip,
    }
}

const ORGAN_CLOCK: [OrganWindow; 12] = [
    window(23, "gallbladder", "Bile flows most freely; decisiveness is strongest.", "Be in deep sleep.", "Late-night eating burdens the gallbladder."),
    window(1, "liver", "Detoxification and metabolism are most active.", "Sleep well; avoid staying up.", "Late nights tax the liver and dull the next day."),
    window(3, "lungs", "Breathing and circulation are busy.", "Rest in deep, natural breathing.", "A few deep breaths on waking help the lungs."),
    window(5, "large intestine", "The natural time for elimination.", "Drink warm water after rising.", "Clockwise belly massage eases sluggish bowels."),
    window(7, "stomach", "Digestion and absorption are strongest.", "Eat a balanced breakfast.", "Skip iced drinks and raw cold food."),
    window(9, "spleen", "Nutrients are absorbed and fluids transformed.", "Good hours for light desk work and study.", "Long sitting and overthinking weaken the spleen."),
    window(11, "heart", "Circulation peaks with the midday sun.", "Take a 15 to 30 minute rest.", "Avoid strenuous exercise and agitation."),
    window(13, "small intestine", "Food is sorted and its essence absorbed.", "Walk slowly after lunch.", "Overeating strains the small intestine."),
    window(15, "bladder", "Waste clearance is at its best.", "Drink enough water.", "Holding urine strains the bladder and kidneys."),
    window(17, "kidneys", "Energy is stored and reserves rebuilt.", "Suited to relaxed social time.", "Overwork drains reserves."),
    window(19, "pericardium", "Protects the heart and settles the mood.", "A light dinner with family or friends.", "Keep dinner light; do not overfill."),
    window(21, "triple burner", "Coordinates the organs before sleep.", "Wind down and prepare for bed.", "Put screens away before sleep."),
];

/// The organ-clock window containing `hour` (0–23).
pub fn organ_window(hour: u8) -> Result<OrganWindow> {
    if hour > 23 {
        return Err(EngineError::InvalidRange(format!(
            "hour {hour} is outside 0..=23"
        )));
    }
    Ok(ORGAN_CLOCK[((hour as usize + 1) % 24) / 2])
}

/// Care advice for an element's season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ElementCare {
    pub element: Element,
    pub colors: &'static [&'static str],
    pub foods: &'static [&'static str],
    pub exercise: &'static [&'static str],
    pub mood: &'static [&'static str],
    pub focus: &'static str,
}

pub fn element_care(element: Element) -> ElementCare {
    let (colors, foods, exercise, mood, focus): (
        &'static [&'static str],
        &'static [&'static str],
        &'static [&'static str],
        &'static [&'static str],
        &'static str,
    ) = match element {
        Element::Wood => (
            &["green", "cyan"],
            &["leafy greens", "beans", "fruit", "nuts"],
            &["walking", "jogging", "yoga", "stretching"],
            &["stay cheerful", "avoid anger", "release stress"],
            "Keep energy flowing and emotions unblocked.",
        ),
        Element::Fire => (
            &["red", "purple"],
            &["red foods", "bitter foods", "cooling foods"],
            &["swimming", "tai chi", "light exercise"],
            &["stay even", "avoid impatience", "quiet the mind"],
            "Calm the heart and clear excess heat.",
        ),
        Element::Earth => (
            &["yellow", "brown"],
            &["yellow foods", "plain sweet foods", "easily digested foods"],
            &["walking", "brisk walking", "avoid damp places"],
            &["avoid overthinking", "stay steady"],
            "Strengthen digestion and clear damp.",
        ),
        Element::Metal => (
            &["white", "gold"],
            &["white foods that moisten the lungs", "nourishing foods"],
            &["breathing practice", "outdoor walks"],
            &["stay calm", "avoid grief"],
            "Moisten the lungs and guard against dryness.",
        ),
        Element::Water => (
            &["black", "blue"],
            &["black foods", "warming foods", "salty foods in moderation"],
            &["warm-up exercise", "moderate activity"],
            &["keep the spirit inward", "avoid fear"],
            "Warm the kidneys and build reserves.",
        ),
    };
    ElementCare {
        element,
        colors,
        foods,
        exercise,
        mood,
        focus,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeasonHealth {
    pub date: CalendarDate,
    pub season: Season,
    pub element: Element,
    pub organs: &'static str,
    pub characteristics: &'static str,
    pub advice: [&'static str; 4],
    pub organ_clock: OrganWindow,
    pub care: ElementCare,
}

pub fn season_health(date: CalendarDate, hour: u8) -> Result<SeasonHealth> {
    let season = Season::of(date);
    Ok(SeasonHealth {
        date,
        season,
        element: season.element(),
        organs: season.organs(),
        characteristics: season.character(),
        advice: season.advice(),
        organ_clock: organ_window(hour)?,
        care: element_care(season.element()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn test_season_boundaries() {
        let cases = [
            ("2025-01-01", Season::Winter),
            ("2025-02-03", Season::Winter),
            ("2025-02-04", Season::Spring),
            ("2025-05-04", Season::Spring),
            ("2025-05-05", Season::Summer),
            ("2025-08-06", Season::Summer),
            ("2025-08-07", Season::LateSummer),
            ("2025-09-06", Season::LateSummer),
            ("2025-09-07", Season::Autumn),
            ("2025-11-06", Season::Autumn),
            ("2025-11-07", Season::Winter),
            ("2025-12-31", Season::Winter),
        ];
        for (d, want) in cases {
            assert_eq!(Season::of(date(d)), want, "{d}");
        }
    }

    #[test]
    fn test_each_season_has_its_own_element() {
        let mut elements: Vec<Element> = [
            Season::Spring,
            Season::Summer,
            Season::LateSummer,
            Season::Autumn,
            Season::Winter,
        ]
        .into_iter()
        .map(Season::element)
        .collect();
        elements.sort();
        assert_eq!(elements, Element::ALL.to_vec());
    }

    #[test]
    fn test_organ_clock_wraps_midnight() {
        assert_eq!(organ_window(23).unwrap().organ, "gallbladder");
        assert_eq!(organ_window(0).unwrap().organ, "gallbladder");
        assert_eq!(organ_window(0).unwrap().end_hour, 1);
        assert_eq!(organ_window(1).unwrap().organ, "liver");
        assert_eq!(organ_window(2).unwrap().organ, "liver");
        assert_eq!(organ_window(12).unwrap().organ, "heart");
        assert_eq!(organ_window(22).unwrap().organ, "triple burner");
        assert!(matches!(organ_window(24), Err(EngineError::InvalidRange(_))));
    }

    #[test]
    fn test_every_window_spans_two_hours() {
        for hour in 0..24u8 {
            let w = organ_window(hour).unwrap();
            let into = (hour + 24 - w.start_hour) % 24;
            assert!(into < 2, "hour {hour} in window starting {}", w.start_hour);
        }
    }

    #[test]
    fn test_season_health_for_a_winter_night() {
        let h = season_health(date("2025-12-01"), 23).unwrap();
        assert_eq!(h.season, Season::Winter);
        assert_eq!(h.element, Element::Water);
        assert_eq!(h.care.element, Element::Water);
        assert_eq!(h.organs, "kidneys, bladder");
        assert_eq!(h.organ_clock.organ, "gallbladder");
        assert!(h.care.colors.contains(&"black"));
    }
}
