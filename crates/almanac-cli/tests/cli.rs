//! CLI command integration tests.
//! Each test uses a temp directory via ALMANAC_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn almanac_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("almanac").unwrap();
    cmd.env("ALMANAC_DATA_DIR", data_dir.path());
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn cycle_on_anchor_day_is_zero() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args([
        "cycle",
        "1990-06-15",
        "--date",
        "1990-06-15",
        "--json",
    ]));
    assert_eq!(v["physical"], 0);
    assert_eq!(v["emotional"], 0);
    assert_eq!(v["intellectual"], 0);
    assert_eq!(v["offset"], 0);
}

#[test]
fn cycle_text_output() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["cycle", "1990-06-15", "--date", "1990-06-21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("physical:     100"))
        .stdout(predicate::str::contains("days:         6"));
}

#[test]
fn calendar_page_for_known_date() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["calendar", "2025-09-23"])
        .assert()
        .success()
        .stdout(predicate::str::contains("183"))
        .stdout(predicate::str::contains("Magnetic Blue Night"));
}

#[test]
fn invalid_date_fails() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["cycle", "1990-02-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date format"));
}

#[test]
fn range_from_to_length() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args([
        "range",
        "1990-06-15",
        "--from",
        "2025-01-01",
        "--to",
        "2025-01-10",
        "--json",
    ]));
    assert_eq!(v["dates"].as_array().unwrap().len(), 10);
    assert_eq!(v["physical"].as_array().unwrap().len(), 10);
}

#[test]
fn range_over_a_year_fails() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["range", "1990-06-15", "--from", "2024-01-01", "--to", "2026-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));

    almanac_cmd(&dir)
        .args(["range", "1990-06-15", "--before", "400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn trend_json_has_seven_days() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args([
        "trend",
        "1990-06-15",
        "--from",
        "1990-06-15",
        "--json",
    ]));
    let days = v.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "1990-06-15");
    assert_eq!(days[2]["day_type"], "weekend");
    assert_eq!(days[3]["day_type"], "weekday");
}

#[test]
fn summary_text_output() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["summary", "1991-01-01", "--date", "1991-01-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Peak performance day (excellent)"))
        .stdout(predicate::str::contains("total:        288"))
        .stdout(predicate::str::contains("physical:     peak"));
}

#[test]
fn season_at_a_boundary_hour() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args(["season", "2025-11-07", "--hour", "23", "--json"]));
    assert_eq!(v["season"], "winter");
    assert_eq!(v["element"], "water");
    assert_eq!(v["organ_clock"]["organ"], "gallbladder");

    almanac_cmd(&dir)
        .args(["season", "2025-11-07", "--hour", "24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn relation_between_elements() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["relation", "water", "wood"])
        .assert()
        .success()
        .stdout(predicate::str::contains("water feeds wood"))
        .stdout(predicate::str::contains("relation: generates"));

    let v = json_stdout(almanac_cmd(&dir).args([
        "relation",
        "earth",
        "--date",
        "2025-09-22",
        "--json",
    ]));
    assert_eq!(v["to"], "water");
    assert_eq!(v["relation"], "overcomes");
}

#[test]
fn relation_unknown_element_fails() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["relation", "aether", "wood"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown element"));
}

#[test]
fn history_flow() {
    let dir = TempDir::new().unwrap();

    almanac_cmd(&dir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1991-01-01"))
        .stdout(predicate::str::contains("(default)"));

    almanac_cmd(&dir)
        .args(["history", "record", "1990-06-15"])
        .assert()
        .success();

    // Computing cycles records the anchor too
    almanac_cmd(&dir)
        .args(["cycle", "1985-03-03", "--date", "2025-01-01"])
        .assert()
        .success();

    let v = json_stdout(almanac_cmd(&dir).args(["history", "list", "--json"]));
    let anchors: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["anchor_date"].as_str().unwrap())
        .collect();
    assert_eq!(anchors, vec!["1985-03-03", "1990-06-15", "1991-01-01"]);

    almanac_cmd(&dir)
        .args(["history", "remove", "1991-01-01"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not removed"));

    almanac_cmd(&dir)
        .args(["history", "clear"])
        .assert()
        .success();

    let v = json_stdout(almanac_cmd(&dir).args(["history", "list", "--json"]));
    assert_eq!(v.as_array().unwrap().len(), 1);
    assert_eq!(v[0]["anchor_date"], "1991-01-01");
}

#[test]
fn export_then_import_into_fresh_dir() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["history", "record", "1990-06-15"])
        .assert()
        .success();

    let file = dir.path().join("export.json");
    almanac_cmd(&dir)
        .arg("export")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let other = TempDir::new().unwrap();
    almanac_cmd(&other)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("entries=2"));

    almanac_cmd(&other)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1990-06-15"));
}

#[test]
fn import_legacy_user_config() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("user_config.json");
    std::fs::write(
        &legacy,
        r#"{
  "biorhythm_history": [
    {"birth_date": "1988-08-08", "last_used": "2024-01-01T00:00:00", "usage_count": 4, "is_default": false},
    {"birth_date": "1991-01-01", "last_used": "2023-01-01T00:00:00", "usage_count": 1, "is_default": true}
  ],
  "max_history_items": 6,
  "preferences": {"theme": "dark", "language": "en", "show_tips": false}
}"#,
    )
    .unwrap();

    almanac_cmd(&dir)
        .arg("import")
        .arg(&legacy)
        .assert()
        .success();

    let v = json_stdout(almanac_cmd(&dir).args(["history", "list", "--json"]));
    assert_eq!(v[0]["anchor_date"], "1988-08-08");
    assert_eq!(v[0]["use_count"], 4);
}

#[test]
fn health_reports_ok() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("status:      ok"))
        .stdout(predicate::str::contains("persistence: ready"));
}

#[test]
fn dress_json_shape() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args(["dress", "2025-09-23", "--json"]));
    assert_eq!(v["color_suggestions"].as_array().unwrap().len(), 5);
    let favor = v["food_suggestions"]["favor"].as_array().unwrap().len();
    let avoid = v["food_suggestions"]["avoid"].as_array().unwrap().len();
    assert!((3..=5).contains(&favor), "favor: {favor}");
    assert!((3..=5).contains(&avoid), "avoid: {avoid}");
}

#[test]
fn energy_by_animal_name() {
    let dir = TempDir::new().unwrap();
    let v = json_stdout(almanac_cmd(&dir).args([
        "energy",
        "goat",
        "--date",
        "2025-09-22",
        "--json",
    ]));
    assert_eq!(v["zodiac"], "goat");
    assert_eq!(v["energy_match"]["relation"], "generates");
}

#[test]
fn unknown_zodiac_fails() {
    let dir = TempDir::new().unwrap();
    almanac_cmd(&dir)
        .args(["energy", "unicorn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown element"));
}
