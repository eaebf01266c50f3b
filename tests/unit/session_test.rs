//! Unit tests for the session state machines.

use repflow::execution::autoplay::AutoplaySession;
use repflow::execution::aerobic::AerobicSession;
use repflow::execution::session::{ExecutionSession, SessionCommand, TickOutcome};
use repflow::execution::strict::StrictSession;
use repflow::metrics::zones::IntensityZone;
use repflow::workouts::aerobic::{AerobicWorkout, BlockStep, DurationType, Sport, WorkoutBlock};
use repflow::workouts::autoplay::{AutoplayItem, AutoplayItemKind, AutoplayWorkout};
use repflow::workouts::types::{SessionStatus, WorkoutError};

fn aerobic(durations: &[&str]) -> AerobicWorkout {
    let mut workout = AerobicWorkout::new("Steps", Sport::Running);
    workout.blocks.push(WorkoutBlock {
        id: "b".to_string(),
        name: "Main".to_string(),
        repetitions: 1,
        steps: durations
            .iter()
            .enumerate()
            .map(|(i, d)| BlockStep {
                id: format!("s{}", i),
                name: format!("Step {}", i),
                duration_type: DurationType::Time,
                duration: d.to_string(),
                intensity: IntensityZone::Z2,
                level: 1,
            })
            .collect(),
    });
    workout
}

#[test]
fn test_timer_auto_advance_after_duration() {
    let mut session = AerobicSession::new(&aerobic(&["00:00:05", "00:00:08"])).unwrap();

    for _ in 0..4 {
        assert_eq!(session.tick(), TickOutcome::Counted);
        assert_eq!(session.cursor(), 0);
    }
    assert_eq!(session.tick(), TickOutcome::StepChanged { from: 0, to: 1 });
    assert_eq!(session.cursor(), 1);
    assert_eq!(session.timer().value(), 8);
}

#[test]
fn test_empty_workouts_never_start() {
    assert_eq!(
        AerobicSession::new(&AerobicWorkout::new("Empty", Sport::Running)).err(),
        Some(WorkoutError::EmptyWorkout)
    );
    assert_eq!(
        AutoplaySession::new(&AutoplayWorkout::default(), 3).err(),
        Some(WorkoutError::EmptyWorkout)
    );
    assert_eq!(StrictSession::new(Vec::new()).err(), Some(WorkoutError::EmptyWorkout));
}

#[test]
fn test_navigation_edges_are_not_errors() {
    let mut session = AerobicSession::new(&aerobic(&["00:00:30", "00:00:30"])).unwrap();

    assert_eq!(session.skip_backward(), TickOutcome::TimerReset);
    assert_eq!(session.skip_forward(), TickOutcome::StepChanged { from: 0, to: 1 });
    assert_eq!(session.skip_forward(), TickOutcome::Finished);
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.skip_forward(), TickOutcome::Idle);
    assert_eq!(session.progress_percent(), 100.0);
}

#[test]
fn test_progress_caps_when_a_step_is_skipped_twice() {
    let mut session = AerobicSession::new(&aerobic(&["00:01:00", "00:01:00"])).unwrap();

    session.skip_forward();
    session.skip_backward();
    session.skip_forward();
    assert_eq!(session.skip_forward(), TickOutcome::Finished);
    assert_eq!(session.completed_count(), 3);
    assert_eq!(session.total_count(), 2);
    assert_eq!(session.progress_percent(), 100.0);
}

#[test]
fn test_pause_freezes_timer_and_totals() {
    let mut session = AerobicSession::new(&aerobic(&["00:00:30"])).unwrap();
    session.tick();

    session.handle(&SessionCommand::TogglePause);
    for _ in 0..5 {
        session.tick();
    }
    assert_eq!(session.timer().value(), 29);
    assert_eq!(session.elapsed_seconds(), 1);

    assert_eq!(session.handle(&SessionCommand::TogglePause), TickOutcome::Resumed);
    session.tick();
    assert_eq!(session.timer().value(), 28);
}

#[test]
fn test_set_commands_ignored_outside_strict() {
    let mut session = AerobicSession::new(&aerobic(&["00:00:30"])).unwrap();

    assert_eq!(session.handle(&SessionCommand::CompleteSet), TickOutcome::Idle);
    assert_eq!(session.handle(&SessionCommand::AdjustRest(15)), TickOutcome::Idle);
    assert_eq!(session.cursor(), 0);
}

#[test]
fn test_autoplay_skips_accrue_nothing_extra() {
    let items = ["a", "b", "c"]
        .iter()
        .map(|id| AutoplayItem {
            id: id.to_string(),
            kind: AutoplayItemKind::Exercise,
            name: id.to_string(),
            category: String::new(),
            equipment: String::new(),
            duration: 20,
            label: String::new(),
            repeat: 1,
            block_id: None,
        })
        .collect();
    let workout = AutoplayWorkout {
        name: "Skips".to_string(),
        items,
        blocks: Vec::new(),
    };

    let mut session = AutoplaySession::new(&workout, 0).unwrap();
    session.tick();
    session.tick();
    session.skip_forward();
    session.skip_forward();
    session.tick();

    assert_eq!(session.cursor(), 2);
    assert_eq!(session.elapsed_seconds(), 2);
    assert_eq!(session.summary().work_seconds, 2);
    assert_eq!(session.completed_count(), 2);
}
