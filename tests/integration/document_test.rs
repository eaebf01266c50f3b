//! Integration tests for workout documents and configuration files.

use repflow::execution::autoplay::AutoplaySession;
use repflow::execution::session::ExecutionSession;
use repflow::metrics::summary::{AerobicPlan, AutoplayPlan};
use repflow::storage::config::{load_config_from, save_config_to, AppConfig};
use repflow::workouts::aerobic::{AerobicEditor, Sport};
use repflow::workouts::document::{load_document, WorkoutDocument};
use repflow::workouts::ids::default_ids;
use repflow::workouts::types::SessionStatus;
use tempfile::tempdir;

const AUTOPLAY_JSON: &str = r#"{
    "type": "autoplay",
    "name": "Tabata",
    "blocks": [{"id": "blk", "name": "Block A", "rounds": 4}],
    "items": [
        {"id": "burpee", "kind": "exercise", "name": "Burpee", "duration": 20, "block_id": "blk"},
        {"id": "breathe", "kind": "rest", "name": "Rest", "duration": 10, "block_id": "blk"},
        {"id": "stretch", "kind": "exercise", "name": "Stretch", "duration": 30, "repeat": 2}
    ]
}"#;

#[test]
fn test_autoplay_document_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tabata.json");
    std::fs::write(&path, AUTOPLAY_JSON).unwrap();

    let WorkoutDocument::Autoplay(workout) = load_document(&path).unwrap() else {
        panic!("expected autoplay document");
    };

    let plan = AutoplayPlan::from_workout(&workout);
    assert_eq!(plan.item_count, 4 * 2 + 2);
    assert_eq!(plan.exercise_count, 4 + 2);
    assert_eq!(plan.work_seconds, 4 * 20 + 2 * 30);
    assert_eq!(plan.rest_seconds, 4 * 10);

    let mut session = AutoplaySession::new(&workout, 0).unwrap();
    while !session.is_finished() {
        session.tick();
    }
    let summary = session.summary();
    assert_eq!(summary.work_seconds, plan.work_seconds);
    assert_eq!(summary.rest_seconds, plan.rest_seconds);
    assert_eq!(session.status(), SessionStatus::Finished);
}

#[test]
fn test_default_plan_round_trips_through_document() {
    let editor = AerobicEditor::with_default_plan("Base", Sport::Running, default_ids());
    let document = WorkoutDocument::Aerobic(editor.into_workout());

    let dir = tempdir().unwrap();
    let path = dir.path().join("base.json");
    std::fs::write(&path, document.to_json().unwrap()).unwrap();

    let loaded = load_document(&path).unwrap();
    assert_eq!(loaded, document);
    let WorkoutDocument::Aerobic(workout) = loaded else {
        panic!("expected aerobic document");
    };
    assert_eq!(AerobicPlan::from_workout(&workout).planned_seconds, 30 * 60);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.execution.prestart_count = 5;
    config.defaults.strict_rest_secs = 75;
    save_config_to(&config, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    assert_eq!(loaded.execution, config.execution);
    assert_eq!(loaded.defaults, config.defaults);
}
