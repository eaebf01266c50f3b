//! Integration tests for workout execution.
//!
//! Runs each workout type from its editor model through flattening, the
//! session state machine and the async driver.

use std::sync::Arc;

use repflow::execution::aerobic::AerobicSession;
use repflow::execution::autoplay::AutoplaySession;
use repflow::execution::driver::spawn_session;
use repflow::execution::session::{ExecutionSession, TickOutcome};
use repflow::execution::strict::StrictSession;
use repflow::metrics::zones::IntensityZone;
use repflow::storage::config::{EditorDefaults, ExecutionSettings};
use repflow::workouts::aerobic::{AerobicWorkout, BlockStep, DurationType, Sport, WorkoutBlock};
use repflow::workouts::autoplay::{AutoplayEditor, AutoplayWorkout};
use repflow::workouts::flatten::flatten_aerobic;
use repflow::workouts::ids::SequentialIds;
use repflow::workouts::strict::StrictEditor;
use repflow::workouts::types::{AddFromLibrary, LibraryExercise, SessionStatus};

/// Warmup once for 5s in zone 1, then Main twice for 3s in zone 3.
fn warmup_main_workout() -> AerobicWorkout {
    let block = |id: &str, repetitions: u32, seconds: &str, zone: IntensityZone| WorkoutBlock {
        id: id.to_string(),
        name: id.to_string(),
        repetitions,
        steps: vec![BlockStep {
            id: format!("{}-step", id),
            name: "Step 1".to_string(),
            duration_type: DurationType::Time,
            duration: seconds.to_string(),
            intensity: zone,
            level: 1,
        }],
    };

    let mut workout = AerobicWorkout::new("Warmup and main", Sport::Running);
    workout.blocks = vec![
        block("Warmup", 1, "00:00:05", IntensityZone::Z1),
        block("Main", 2, "00:00:03", IntensityZone::Z3),
    ];
    workout
}

#[test]
fn test_aerobic_end_to_end() {
    let workout = warmup_main_workout();

    let flat = flatten_aerobic(&workout);
    let shape: Vec<_> = flat
        .iter()
        .map(|s| (s.block_name.as_str(), s.block_repetition, s.step.duration_seconds(), s.step.intensity))
        .collect();
    assert_eq!(
        shape,
        vec![
            ("Warmup", 1, 5, IntensityZone::Z1),
            ("Main", 1, 3, IntensityZone::Z3),
            ("Main", 2, 3, IntensityZone::Z3),
        ]
    );

    let mut session = AerobicSession::new(&workout).unwrap();
    let mut ticks = 0;
    while session.tick() != TickOutcome::Finished {
        ticks += 1;
        assert!(ticks < 100, "session never finished");
    }

    let summary = session.summary();
    assert_eq!(summary.elapsed_seconds, 11);
    assert_eq!(summary.zone_seconds(IntensityZone::Z1), 5);
    assert_eq!(summary.zone_seconds(IntensityZone::Z3), 6);
    assert_eq!(summary.zones.len(), 2);
    assert_eq!(summary.blocks_completed, 2);
    assert_eq!(summary.elapsed_display, "00:11");
}

#[tokio::test(start_paused = true)]
async fn test_aerobic_end_to_end_through_driver() {
    let session = AerobicSession::new(&warmup_main_workout()).unwrap();
    let mut running = spawn_session(session, ExecutionSettings::default());

    let mut cursors = Vec::new();
    while let Ok(event) = running.events.recv().await {
        if let TickOutcome::StepChanged { to, .. } = event.outcome {
            cursors.push(to);
        }
        if event.outcome == TickOutcome::Finished {
            assert_eq!(event.status, SessionStatus::Finished);
            break;
        }
    }
    assert_eq!(cursors, vec![1, 2]);

    let summary = running.task.await.unwrap();
    assert_eq!(summary.elapsed_seconds, 11);
    assert_eq!(summary.zone_seconds(IntensityZone::Z1), 5);
    assert_eq!(summary.zone_seconds(IntensityZone::Z3), 6);
}

#[tokio::test(start_paused = true)]
async fn test_pause_through_driver_holds_time() {
    let session = AerobicSession::new(&warmup_main_workout()).unwrap();
    let running = spawn_session(session, ExecutionSettings::default());

    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
    running.handle.toggle_pause().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    running.handle.toggle_pause().await.unwrap();

    let summary = running.task.await.unwrap();
    assert_eq!(summary.elapsed_seconds, 11);
}

#[tokio::test(start_paused = true)]
async fn test_autoplay_block_rounds_through_driver() {
    let ids = Arc::new(SequentialIds::new());
    let mut editor = AutoplayEditor::new(AutoplayWorkout::default(), ids, EditorDefaults::default());
    let block = editor.add_block(None);
    let squat = editor.add(&LibraryExercise::new("Squat", "Legs", "None"));
    let rest = editor.add_rest(Some(5));
    editor.assign_block(&squat, Some(&block)).unwrap();
    editor.assign_block(&rest, Some(&block)).unwrap();
    editor.set_duration(&squat, 10).unwrap();
    editor.set_rounds(&block, 2).unwrap();

    let session = AutoplaySession::new(editor.workout(), 3).unwrap();
    assert_eq!(session.len(), 4);

    let summary = spawn_session(session, ExecutionSettings::default()).task.await.unwrap();
    assert_eq!(summary.work_seconds, 20);
    assert_eq!(summary.rest_seconds, 10);
    assert_eq!(summary.elapsed_seconds, 30);
    assert_eq!(summary.completed_items, 4);
}

#[tokio::test(start_paused = true)]
async fn test_strict_session_through_driver() {
    let ids = Arc::new(SequentialIds::new());
    let mut editor = StrictEditor::new(ids, EditorDefaults::default());
    let bench = editor.add(&LibraryExercise::new("Bench press", "Chest", "Barbell"));
    editor.add(&LibraryExercise::new("Row", "Back", "Barbell"));
    editor.set_superset_with_next(0, true).unwrap();
    for set in editor.exercises()[0].sets.clone() {
        editor
            .update_set(&bench, &set.id, |s| s.weight = Some(50.0))
            .unwrap();
    }

    let session = StrictSession::new(editor.into_exercises()).unwrap();
    assert_eq!(session.total_count(), 6);
    let mut running = spawn_session(session, ExecutionSettings::default());

    // Bench set 1 rests for its own 60s, the row closes the round.
    running.handle.complete_set().await.unwrap();
    let mut rests = Vec::new();
    while let Ok(event) = running.events.recv().await {
        match event.outcome {
            TickOutcome::RestStarted(seconds) => {
                rests.push(seconds);
                running.handle.skip_forward().await.unwrap();
            }
            TickOutcome::StepChanged { .. } => running.handle.complete_set().await.unwrap(),
            TickOutcome::Finished => break,
            _ => {}
        }
    }
    assert_eq!(rests, vec![60, 90, 60, 90, 60]);

    let summary = running.task.await.unwrap();
    assert_eq!(summary.completed_sets, 6);
    assert_eq!(summary.volume_kg, 50.0 * (12 + 10 + 8) as f64);
    assert_eq!(summary.volume_display, "1.5t");
}
