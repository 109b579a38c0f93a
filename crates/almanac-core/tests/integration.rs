//! Integration tests across the public surface:
//! parse → cycles / position → seeded readings → ledger → snapshot.

use almanac_core::{
    CalendarDate, CalendarPosition, ContentTables, Engine, EngineConfig, EngineError,
    HealthStatus, InMemoryStore, LedgerSnapshot, Relation, export_json, import_json,
};

fn content() -> ContentTables {
    toml::from_str(include_str!("../../almanac-store/content/default.toml"))
        .expect("built-in content parses")
}

fn engine() -> Engine<InMemoryStore> {
    Engine::new(EngineConfig::default(), content(), InMemoryStore::new()).unwrap()
}

/// The literal scenarios, end to end through the engine.
#[test]
fn literal_scenarios() {
    let mut e = engine();

    let same_day = e.get_cycle_values("1991-01-01", Some("1991-01-01")).unwrap();
    assert_eq!(same_day.values.physical, 0);
    assert_eq!(same_day.values.emotional, 0);
    assert_eq!(same_day.values.intellectual, 0);

    let one_period = e.get_cycle_values("1991-01-01", Some("1991-01-24")).unwrap();
    assert_eq!(one_period.values.physical, 0);

    for (date, ordinal) in [
        ("2025-09-23", 183),
        ("2025-09-24", 184),
        ("2025-09-22", 182),
        ("2026-09-23", 28),
    ] {
        let info = e.get_calendar_info(Some(date)).unwrap();
        assert_eq!(info.position.ordinal, ordinal, "ordinal of {date}");
    }
}

/// Same inputs, same outputs, across separately constructed engines.
#[test]
fn readings_are_deterministic() {
    let a = engine();
    let b = engine();
    for date in ["2024-02-29", "2025-01-01", "2025-06-15", "2025-12-31"] {
        assert_eq!(
            a.get_calendar_info(Some(date)).unwrap(),
            b.get_calendar_info(Some(date)).unwrap()
        );
        assert_eq!(
            a.get_dress_suggestion(Some(date)).unwrap(),
            b.get_dress_suggestion(Some(date)).unwrap()
        );
    }
}

/// Calendar info is consistent with the position resolver.
#[test]
fn calendar_info_matches_resolver() {
    let e = engine();
    let date = CalendarDate::parse("2030-04-17").unwrap();
    let info = e.get_calendar_info(Some("2030-04-17")).unwrap();
    let pos = CalendarPosition::resolve(date);
    assert_eq!(info.position, pos);
    assert_eq!(info.position.tone as i32, (pos.ordinal as i32 - 1) % 13);
    assert_eq!(info.position.seal as i32, (pos.ordinal as i32 - 1) % 20);
    assert_eq!(info.suggestions.len(), 4);
    assert_eq!(info.avoidances.len(), 3);
    assert_eq!(info.energy.len(), 5);
    for reading in &info.energy {
        assert!((50..=95).contains(&reading.score));
    }
}

/// Dress suggestions: every colour system judged, food lists within bounds.
#[test]
fn dress_suggestion_shape() {
    let e = engine();
    let tables = content();
    for day in 1..=28 {
        let date = format!("2025-02-{day:02}");
        let s = e.get_dress_suggestion(Some(&date)).unwrap();
        assert_eq!(s.color_suggestions.len(), tables.dress.color_systems.len());
        let favor = &s.food_suggestions.favor;
        let avoid = &s.food_suggestions.avoid;
        assert!((3..=5).contains(&favor.len()), "{date}: {favor:?}");
        assert!((3..=5).contains(&avoid.len()), "{date}: {avoid:?}");
        for c in &s.color_suggestions {
            assert_eq!(c.relation, Relation::between(s.daily_element, c.element));
        }
    }
}

/// The ledger across an export → import into a fresh engine.
#[test]
fn history_export_import() {
    let mut e = engine();
    e.record_anchor("1980-03-03").unwrap();
    e.get_birth_chart("1975-07-07").unwrap();
    let json = export_json(&e.export_snapshot()).unwrap();

    let mut fresh = engine();
    fresh.import_snapshot(import_json(&json).unwrap()).unwrap();
    assert_eq!(
        fresh.list_history(),
        vec!["1975-07-07", "1980-03-03", "1991-01-01"]
    );
}

/// A store that refuses saves degrades health but never breaks a reading.
#[test]
fn offline_store_degrades_health() {
    let mut e = Engine::new(EngineConfig::default(), content(), InMemoryStore::offline()).unwrap();
    assert!(e.get_birth_chart("1999-09-09").is_ok());
    assert_eq!(e.health_check().status, HealthStatus::Degraded);
    assert!(matches!(
        e.clear_history(),
        Err(EngineError::PersistenceUnavailable(_))
    ));
}

/// A loaded snapshot larger than the configured cap is trimmed.
#[test]
fn oversized_snapshot_is_trimmed() {
    let json = r#"{
        "biorhythm_history": [
            {"birth_date": "2001-01-01", "usage_count": 1},
            {"birth_date": "2002-01-01", "usage_count": 1},
            {"birth_date": "2003-01-01", "usage_count": 1},
            {"birth_date": "2004-01-01", "usage_count": 1},
            {"birth_date": "2005-01-01", "usage_count": 1},
            {"birth_date": "2006-01-01", "usage_count": 1},
            {"birth_date": "2007-01-01", "usage_count": 1}
        ],
        "max_history_items": 10
    }"#;
    let snapshot: LedgerSnapshot = import_json(json).unwrap();
    let e = Engine::new(
        EngineConfig::default(),
        content(),
        InMemoryStore::with_snapshot(snapshot),
    )
    .unwrap();
    let list = e.list_history();
    assert_eq!(list.len(), 6);
    assert_eq!(list[0], "2001-01-01");
    assert_eq!(list[5], "1991-01-01");
}
