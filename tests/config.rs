#![forbid(unsafe_code)]
use chrono::NaiveDate;
use fairrota::{load_config_from_file, load_config_from_str, ExceptionEntry, OperatorId, ShiftId};
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r#"{
  "title": "Sound schedule",
  "start_date": "2024-12-01",
  "end_date": "2025-01-31",
  "shifts": {
    "Sunday": ["Sunday AM", "Sunday PM"],
    "Wednesday": ["Wednesday"]
  },
  "operators": [
    { "name": "Alice", "phone": "555-0100", "shifts": ["Sunday AM", "Wednesday"],
      "exceptions": [["2024-12-08", "Sunday AM"], ["2024-12-15"]] },
    { "name": "Bob", "phone": "555-0101", "shifts": ["Sunday AM", "Sunday PM"] },
    { "name": "Chloé", "shifts": ["Sunday PM", "Wednesday"] },
    { "name": "Dan", "phone": "555-0103", "shifts": [] }
  ],
  "notes": ["Swap among yourselves if needed."]
}"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_sample_and_builds_core_inputs() {
    let cfg = load_config_from_str(SAMPLE).unwrap();
    assert!(cfg.no_repeat);
    assert_eq!(cfg.year_label(), "2024/2025");
    assert_eq!(
        cfg.operators[0].exceptions,
        vec![
            ExceptionEntry::Shift(date(2024, 12, 8), "Sunday AM".into()),
            ExceptionEntry::WholeDay([date(2024, 12, 15)]),
        ]
    );

    let roster = cfg.roster().unwrap();
    let names: Vec<&str> = roster.names().iter().map(OperatorId::as_str).collect();
    // Dan n'a aucun créneau : hors tirage
    assert_eq!(names, ["Alice", "Bob", "Chloé"]);

    let pm: Vec<&str> = roster
        .available_for(&ShiftId::new("Sunday PM"))
        .unwrap()
        .iter()
        .map(OperatorId::as_str)
        .collect();
    assert_eq!(pm, ["Bob", "Chloé"]);
    assert!(roster.available_for(&ShiftId::new("Friday")).is_none());

    let cal = cfg.calendar().unwrap();
    assert!(!cal.is_empty());
}

#[test]
fn whole_day_exception_expands_to_every_shift_of_the_day() {
    let cfg = load_config_from_str(SAMPLE).unwrap();
    let roster = cfg.roster().unwrap();
    let alice = OperatorId::new("Alice");
    let ex = roster.exceptions();

    let sunday = date(2024, 12, 15);
    assert!(ex.is_excluded(sunday, &ShiftId::new("Sunday AM"), &alice));
    assert!(ex.is_excluded(sunday, &ShiftId::new("Sunday PM"), &alice));
    assert!(ex.is_excluded(date(2024, 12, 8), &ShiftId::new("Sunday AM"), &alice));
    assert!(!ex.is_excluded(date(2024, 12, 8), &ShiftId::new("Sunday PM"), &alice));
    assert_eq!(ex.len(), 3);
}

#[test]
fn single_year_label() {
    let raw = SAMPLE.replace("2025-01-31", "2024-12-31");
    let cfg = load_config_from_str(&raw).unwrap();
    assert_eq!(cfg.year_label(), "2024");
}

#[test]
fn no_repeat_can_be_disabled() {
    let raw = SAMPLE.replace("\"notes\"", "\"no_repeat\": false,\n  \"notes\"");
    let cfg = load_config_from_str(&raw).unwrap();
    assert!(!cfg.assign_options().no_repeat);
}

#[test]
fn short_weekday_names_are_accepted() {
    let raw = SAMPLE.replace("\"Sunday\":", "\"Sun\":");
    let cfg = load_config_from_str(&raw).unwrap();
    assert_eq!(cfg.calendar().unwrap().shifts_on(chrono::Weekday::Sun).len(), 2);
}

#[test]
fn rejects_unknown_weekday() {
    let raw = SAMPLE.replace("\"Wednesday\": [", "\"Caturday\": [");
    let err = load_config_from_str(&raw).unwrap_err();
    assert!(err.to_string().contains("unknown weekday"), "{err}");
}

#[test]
fn rejects_duplicate_operator() {
    let raw = SAMPLE.replace("\"name\": \"Bob\"", "\"name\": \"Alice\"");
    let err = load_config_from_str(&raw).unwrap_err();
    assert!(err.to_string().contains("duplicate operator"), "{err}");
}

#[test]
fn rejects_exception_on_unscheduled_shift() {
    // 2024-12-09 est un lundi : aucun créneau ce jour-là
    let raw = SAMPLE.replace("[\"2024-12-08\", \"Sunday AM\"]", "[\"2024-12-09\", \"Sunday AM\"]");
    let err = load_config_from_str(&raw).unwrap_err();
    assert!(err.to_string().contains("not scheduled"), "{err}");
}

#[test]
fn rejects_missing_required_fields() {
    assert!(load_config_from_str(r#"{ "title": "x" }"#).is_err());
    assert!(load_config_from_str(r#"{ "title": "", "start_date": "2024-01-01", "end_date": "2024-01-02" }"#).is_err());
}

#[test]
fn loads_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("team.json");
    fs::write(&path, SAMPLE).unwrap();
    let cfg = load_config_from_file(&path).unwrap();
    assert_eq!(cfg.title, "Sound schedule");

    let missing = load_config_from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{missing:#}").contains("reading"));
}
