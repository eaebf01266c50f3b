//! Unit tests for summaries and progress figures.

use std::collections::BTreeSet;

use repflow::metrics::summary::{format_volume, progress_percent, strict_volume, StrictSummary};
use repflow::workouts::strict::{ExerciseKind, Reps, SetRef, StrictExercise, StrictSet};

fn set(id: &str, weight: Option<f32>, reps: u32) -> StrictSet {
    StrictSet {
        id: id.to_string(),
        reps: Some(Reps::Fixed(reps)),
        weight,
        ..Default::default()
    }
}

#[test]
fn test_volume_treats_missing_weight_as_zero() {
    let exercises = vec![StrictExercise {
        id: "e".to_string(),
        name: "Row".to_string(),
        thumbnail: String::new(),
        category: String::new(),
        equipment: String::new(),
        kind: ExerciseKind::WeightReps,
        sets: vec![set("s1", Some(20.0), 10), set("s2", None, 8), set("s3", Some(0.0), 8)],
        superset_with_next: false,
        notes: String::new(),
        rest_duration: 0,
        rest_between_rounds: 90,
    }];
    let completed: BTreeSet<SetRef> = (0..3).map(|n| SetRef::new(0, n)).collect();

    assert_eq!(strict_volume(&exercises, &completed), 200.0);
}

#[test]
fn test_volume_keys_sets_by_position() {
    let row = |id: &str, weight: f32| StrictExercise {
        id: id.to_string(),
        name: id.to_string(),
        thumbnail: String::new(),
        category: String::new(),
        equipment: String::new(),
        kind: ExerciseKind::WeightReps,
        sets: vec![set("s1", Some(weight), 10)],
        superset_with_next: false,
        notes: String::new(),
        rest_duration: 0,
        rest_between_rounds: 90,
    };
    let exercises = vec![row("a", 20.0), row("b", 50.0)];
    let completed: BTreeSet<SetRef> = [SetRef::new(1, 0)].into_iter().collect();

    assert_eq!(strict_volume(&exercises, &completed), 500.0);
    assert_eq!(SetRef::find(&exercises, "b", "s1"), Some(SetRef::new(1, 0)));
    assert_eq!(SetRef::find(&exercises, "c", "s1"), None);
}

#[test]
fn test_rep_range_credits_lower_bound() {
    let mut range = set("r", Some(10.0), 0);
    range.reps = Some(Reps::Range(8, 12));
    assert_eq!(range.volume(), 80.0);
}

#[test]
fn test_progress_never_divides_by_zero() {
    let percent = progress_percent(0, 0);
    assert_eq!(percent, 0.0);
    assert!(!percent.is_nan());
}

#[test]
fn test_strict_summary_display() {
    let summary = StrictSummary::new(3725, 9, 12, 2500.0);
    assert_eq!(summary.elapsed_display, "1:02:05");
    assert_eq!(summary.volume_display, "2.5t");
    assert_eq!(format_volume(200.0), "200kg");
}
