//! Strict session: sets are checked off by hand, rests count down.

use std::collections::BTreeSet;

use crate::execution::session::{ExecutionSession, Playhead, SessionCommand, TickOutcome};
use crate::execution::timer::{StepTimer, TimerTick};
use crate::metrics::summary::{strict_volume, StrictSummary};
use crate::workouts::flatten::{flatten_strict, FocusStep};
use crate::workouts::strict::{SetRef, StrictExercise, StrictSet};
use crate::workouts::types::{SessionStatus, WorkoutError};

/// Execution state of a strict workout.
///
/// Set steps never advance on their own. Completing a set that carries a
/// rest starts a rest sub-phase on the same step; the cursor moves once the
/// rest runs out or is skipped.
#[derive(Debug, Clone)]
pub struct StrictSession {
    exercises: Vec<StrictExercise>,
    steps: Vec<FocusStep>,
    playhead: Playhead,
    timer: StepTimer,
    rest: Option<StepTimer>,
    completed_sets: BTreeSet<SetRef>,
    total_sets: usize,
}

impl StrictSession {
    pub fn new(exercises: Vec<StrictExercise>) -> Result<Self, WorkoutError> {
        let steps = flatten_strict(&exercises);
        let first = steps.first().ok_or(WorkoutError::EmptyWorkout)?;
        let timer = Self::timer_for(first);
        let total_sets = steps.iter().filter(|s| !s.is_rest_step).count();

        tracing::info!(
            "Strict session started: {} exercises, {} sets",
            exercises.len(),
            total_sets
        );

        Ok(Self {
            playhead: Playhead::new(steps.len(), SessionStatus::Running),
            exercises,
            steps,
            timer,
            rest: None,
            completed_sets: BTreeSet::new(),
            total_sets,
        })
    }

    fn timer_for(step: &FocusStep) -> StepTimer {
        if step.is_rest_step {
            StepTimer::count_down(step.duration)
        } else {
            StepTimer::manual()
        }
    }

    fn sync_timer(&mut self, outcome: &TickOutcome) {
        match outcome {
            TickOutcome::StepChanged { .. } => {
                if let Some(step) = self.steps.get(self.playhead.index()) {
                    self.timer = Self::timer_for(step);
                }
            }
            TickOutcome::TimerReset => self.timer.reset(),
            _ => {}
        }
    }

    fn advance(&mut self) -> TickOutcome {
        self.rest = None;
        let outcome = self.playhead.advance();
        self.sync_timer(&outcome);
        outcome
    }

    pub fn exercises(&self) -> &[StrictExercise] {
        &self.exercises
    }

    pub fn steps(&self) -> &[FocusStep] {
        &self.steps
    }

    pub fn current_step(&self) -> Option<&FocusStep> {
        self.steps.get(self.playhead.index())
    }

    pub fn next_step(&self) -> Option<&FocusStep> {
        self.steps.get(self.playhead.index() + 1)
    }

    pub fn current_exercise(&self) -> Option<&StrictExercise> {
        self.current_step().and_then(|s| self.exercises.get(s.exercise_index))
    }

    /// The set under the cursor, `None` on rest steps.
    pub fn current_set(&self) -> Option<&StrictSet> {
        let step = self.current_step()?;
        self.exercises.get(step.exercise_index)?.sets.get(step.set_index?)
    }

    pub fn is_resting(&self) -> bool {
        self.rest.is_some()
    }

    /// Timer of the active rest sub-phase.
    pub fn rest_timer(&self) -> Option<&StepTimer> {
        self.rest.as_ref()
    }

    /// Ring fill for the active countdown, the rest sub-phase when one runs.
    pub fn step_progress(&self) -> f32 {
        self.rest.as_ref().unwrap_or(&self.timer).remaining_ratio()
    }

    pub fn is_set_completed(&self, exercise_id: &str, set_id: &str) -> bool {
        SetRef::find(&self.exercises, exercise_id, set_id).is_some_and(|set| self.completed_sets.contains(&set))
    }

    pub fn completed_sets(&self) -> &BTreeSet<SetRef> {
        &self.completed_sets
    }

    /// Kilograms moved in completed sets so far.
    pub fn volume(&self) -> f64 {
        strict_volume(&self.exercises, &self.completed_sets)
    }

    /// Check off the set under the cursor and rest or move on.
    pub fn complete_set(&mut self) -> TickOutcome {
        if !self.playhead.is_navigable() || self.rest.is_some() {
            return TickOutcome::Idle;
        }
        let Some(step) = self.current_step().cloned() else {
            return TickOutcome::Idle;
        };
        let Some(set) = step.set_ref() else {
            tracing::warn!("No set to complete on a rest step");
            return TickOutcome::Idle;
        };

        tracing::debug!("Completed set {:?}", step.set_id);
        self.completed_sets.insert(set);

        if step.rest_after > 0 && !self.playhead.is_last() {
            self.rest = Some(StepTimer::count_down(step.rest_after));
            return TickOutcome::RestStarted(step.rest_after);
        }
        self.advance()
    }

    /// Flip completion of any set without moving the cursor.
    pub fn toggle_set(&mut self, exercise_id: &str, set_id: &str) -> TickOutcome {
        if self.playhead.status() == SessionStatus::Finished {
            return TickOutcome::Idle;
        }
        let Some(set) = SetRef::find(&self.exercises, exercise_id, set_id) else {
            tracing::warn!("Unknown set {} of exercise {}", set_id, exercise_id);
            return TickOutcome::Idle;
        };

        let completed = if self.completed_sets.remove(&set) {
            false
        } else {
            self.completed_sets.insert(set);
            true
        };
        TickOutcome::SetToggled {
            exercise_id: exercise_id.to_string(),
            set_id: set_id.to_string(),
            completed,
        }
    }

    /// Lengthen or shorten the active rest, never below zero.
    pub fn adjust_rest(&mut self, delta: i32) -> TickOutcome {
        match self.rest.as_mut() {
            Some(rest) => {
                rest.adjust(delta);
                TickOutcome::RestAdjusted(rest.value())
            }
            None => TickOutcome::Idle,
        }
    }
}

impl ExecutionSession for StrictSession {
    type Summary = StrictSummary;

    fn status(&self) -> SessionStatus {
        self.playhead.status()
    }

    fn cursor(&self) -> usize {
        self.playhead.index()
    }

    fn len(&self) -> usize {
        self.steps.len()
    }

    fn elapsed_seconds(&self) -> u32 {
        self.playhead.elapsed_seconds()
    }

    fn completed_count(&self) -> usize {
        self.completed_sets.len()
    }

    fn total_count(&self) -> usize {
        self.total_sets
    }

    fn timer(&self) -> &StepTimer {
        &self.timer
    }

    fn display_seconds(&self) -> u32 {
        match &self.rest {
            Some(rest) => rest.value(),
            None => self.timer.value(),
        }
    }

    fn tick(&mut self) -> TickOutcome {
        if !self.playhead.is_running() || self.current_step().is_none() {
            return TickOutcome::Idle;
        }
        self.playhead.count_second();

        let expired = match self.rest.as_mut() {
            Some(rest) => rest.tick(),
            None => self.timer.tick(),
        };
        match expired {
            TimerTick::Running => TickOutcome::Counted,
            TimerTick::Expired => self.advance(),
        }
    }

    fn toggle_pause(&mut self) -> TickOutcome {
        self.playhead.toggle_pause()
    }

    fn skip_forward(&mut self) -> TickOutcome {
        if !self.playhead.is_navigable() {
            return TickOutcome::Idle;
        }
        if self.rest.is_none() {
            if let Some(set) = self.current_step().and_then(FocusStep::set_ref) {
                self.completed_sets.insert(set);
            }
        }
        self.advance()
    }

    fn skip_backward(&mut self) -> TickOutcome {
        if !self.playhead.is_navigable() {
            return TickOutcome::Idle;
        }
        self.rest = None;
        let outcome = self.playhead.back();
        self.sync_timer(&outcome);
        outcome
    }

    fn stop(&mut self) -> TickOutcome {
        self.rest = None;
        self.playhead.stop()
    }

    fn handle(&mut self, command: &SessionCommand) -> TickOutcome {
        match command {
            SessionCommand::TogglePause => self.toggle_pause(),
            SessionCommand::SkipForward => self.skip_forward(),
            SessionCommand::SkipBackward => self.skip_backward(),
            SessionCommand::Stop => self.stop(),
            SessionCommand::CompleteSet => self.complete_set(),
            SessionCommand::ToggleSet { exercise_id, set_id } => self.toggle_set(exercise_id, set_id),
            SessionCommand::AdjustRest(delta) => self.adjust_rest(*delta),
        }
    }

    fn summary(&self) -> StrictSummary {
        StrictSummary::new(
            self.playhead.elapsed_seconds(),
            self.completed_sets.len(),
            self.total_sets,
            self.volume(),
        )
    }
}
