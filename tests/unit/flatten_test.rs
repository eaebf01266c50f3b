//! Unit tests for the three flatteners.

use repflow::metrics::zones::IntensityZone;
use repflow::workouts::aerobic::{AerobicWorkout, BlockStep, DurationType, Sport, WorkoutBlock};
use repflow::workouts::autoplay::{AutoplayBlock, AutoplayItem, AutoplayItemKind, AutoplayWorkout};
use repflow::workouts::flatten::{flatten_aerobic, flatten_autoplay, flatten_strict};
use repflow::workouts::strict::{ExerciseKind, Reps, StrictExercise, StrictSet};

fn time_step(id: &str, duration: &str) -> BlockStep {
    BlockStep {
        id: id.to_string(),
        name: id.to_string(),
        duration_type: DurationType::Time,
        duration: duration.to_string(),
        intensity: IntensityZone::Z2,
        level: 1,
    }
}

fn aerobic(repetitions: u32, steps: usize) -> AerobicWorkout {
    let mut workout = AerobicWorkout::new("Intervals", Sport::Cycling);
    workout.blocks.push(WorkoutBlock {
        id: "main".to_string(),
        name: "Main".to_string(),
        repetitions,
        steps: (1..=steps).map(|i| time_step(&format!("s{}", i), "00:01:00")).collect(),
    });
    workout
}

fn item(id: &str, repeat: u32, block_id: Option<&str>) -> AutoplayItem {
    AutoplayItem {
        id: id.to_string(),
        kind: AutoplayItemKind::Exercise,
        name: id.to_string(),
        category: String::new(),
        equipment: String::new(),
        duration: 30,
        label: String::new(),
        repeat,
        block_id: block_id.map(str::to_string),
    }
}

fn exercise(id: &str, sets: usize, rest: u32, linked: bool) -> StrictExercise {
    StrictExercise {
        id: id.to_string(),
        name: id.to_string(),
        thumbnail: String::new(),
        category: String::new(),
        equipment: String::new(),
        kind: ExerciseKind::WeightReps,
        sets: (1..=sets)
            .map(|n| StrictSet {
                id: format!("{}{}", id, n),
                reps: Some(Reps::Fixed(10)),
                weight: Some(40.0),
                rest,
                ..Default::default()
            })
            .collect(),
        superset_with_next: linked,
        notes: String::new(),
        rest_duration: 0,
        rest_between_rounds: 120,
    }
}

#[test]
fn test_flattening_is_deterministic() {
    let workout = aerobic(3, 2);
    assert_eq!(flatten_aerobic(&workout), flatten_aerobic(&workout));

    let exercises = vec![exercise("A", 3, 30, true), exercise("B", 2, 30, false)];
    assert_eq!(flatten_strict(&exercises), flatten_strict(&exercises));
}

#[test]
fn test_repetition_expansion_is_step_major() {
    let flat = flatten_aerobic(&aerobic(4, 3));
    assert_eq!(flat.len(), 12);

    let ids: Vec<_> = flat.iter().map(|s| s.step.id.as_str()).collect();
    assert_eq!(&ids[0..6], &["s1", "s2", "s3", "s1", "s2", "s3"]);
    assert!(flat.iter().all(|s| s.total_block_repetitions == 4));
    assert_eq!(flat[11].block_repetition, 4);
}

#[test]
fn test_autoplay_round_and_repeat_expansion() {
    let block = AutoplayBlock {
        id: "b".to_string(),
        name: "Block A".to_string(),
        rounds: 3,
    };

    let single = AutoplayWorkout {
        name: "x".to_string(),
        items: vec![item("a", 1, Some("b")), item("c", 1, Some("b"))],
        blocks: vec![block.clone()],
    };
    assert_eq!(flatten_autoplay(&single).len(), 3 * 2);

    let repeated = AutoplayWorkout {
        name: "x".to_string(),
        items: vec![item("a", 2, Some("b")), item("c", 2, Some("b"))],
        blocks: vec![block],
    };
    assert_eq!(flatten_autoplay(&repeated).len(), 3 * 2 * 2);
}

#[test]
fn test_unknown_block_id_plays_as_loose_item() {
    let workout = AutoplayWorkout {
        name: "x".to_string(),
        items: vec![item("a", 1, Some("gone"))],
        blocks: Vec::new(),
    };

    let flat = flatten_autoplay(&workout);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].block_round, None);
}

#[test]
fn test_superset_interleaving() {
    let exercises = vec![exercise("A", 3, 30, true), exercise("B", 2, 30, false)];

    let order: Vec<_> = flatten_strict(&exercises)
        .into_iter()
        .filter_map(|s| s.set_id)
        .collect();
    assert_eq!(order, vec!["A1", "B1", "A2", "B2", "A3"]);
}

#[test]
fn test_rest_after_step_policy() {
    let flat = flatten_strict(&[exercise("A", 3, 45, false)]);

    let rests: Vec<_> = flat.iter().map(|s| s.rest_after).collect();
    assert_eq!(rests, vec![45, 45, 0]);
}

#[test]
fn test_superset_round_rest_uses_first_member() {
    let mut b = exercise("B", 2, 30, false);
    b.rest_between_rounds = 5;
    let flat = flatten_strict(&[exercise("A", 2, 30, true), b]);

    let rests: Vec<_> = flat.iter().map(|s| s.rest_after).collect();
    assert_eq!(rests, vec![30, 120, 30, 0]);
}

#[test]
fn test_empty_collections_flatten_to_nothing() {
    assert!(flatten_aerobic(&aerobic(0, 3)).is_empty());
    assert!(flatten_aerobic(&aerobic(2, 0)).is_empty());

    let empty_block = AutoplayWorkout {
        name: "x".to_string(),
        items: Vec::new(),
        blocks: vec![AutoplayBlock {
            id: "b".to_string(),
            name: "Block A".to_string(),
            rounds: 4,
        }],
    };
    assert!(flatten_autoplay(&empty_block).is_empty());
}
