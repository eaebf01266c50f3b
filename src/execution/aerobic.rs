//! Aerobic session: timed and distance steps with per-zone time tracking.

use std::collections::BTreeSet;

use crate::execution::session::{ExecutionSession, Playhead, TickOutcome};
use crate::execution::timer::{StepTimer, TimerTick};
use crate::metrics::summary::AerobicSummary;
use crate::metrics::zones::ZoneTime;
use crate::workouts::aerobic::{AerobicWorkout, Sport};
use crate::workouts::flatten::{flatten_aerobic, ExecutableStep};
use crate::workouts::types::{SessionStatus, WorkoutError};

/// Execution state of an aerobic workout.
///
/// Time steps count down and advance on their own; distance steps count up
/// until the athlete skips forward.
#[derive(Debug, Clone)]
pub struct AerobicSession {
    name: String,
    sport: Sport,
    block_count: usize,
    steps: Vec<ExecutableStep>,
    playhead: Playhead,
    timer: StepTimer,
    zone_time: ZoneTime,
}

impl AerobicSession {
    /// Flatten `workout` and start running its first step.
    pub fn new(workout: &AerobicWorkout) -> Result<Self, WorkoutError> {
        let steps = flatten_aerobic(workout);
        let first = steps.first().ok_or(WorkoutError::EmptyWorkout)?;
        let timer = Self::timer_for(first);

        tracing::info!(
            "Aerobic session '{}' started: {} steps in {} blocks",
            workout.name,
            steps.len(),
            workout.blocks.len()
        );

        Ok(Self {
            name: workout.name.clone(),
            sport: workout.sport,
            block_count: workout.blocks.len(),
            playhead: Playhead::new(steps.len(), SessionStatus::Running),
            steps,
            timer,
            zone_time: ZoneTime::new(),
        })
    }

    fn timer_for(step: &ExecutableStep) -> StepTimer {
        if step.step.is_timed() {
            StepTimer::count_down(step.step.duration_seconds())
        } else {
            StepTimer::count_up()
        }
    }

    /// Re-arm the step timer after a cursor move or reset.
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sport(&self) -> Sport {
        self.sport
    }

    pub fn steps(&self) -> &[ExecutableStep] {
        &self.steps
    }

    pub fn current_step(&self) -> Option<&ExecutableStep> {
        self.steps.get(self.playhead.index())
    }

    /// The step after the current one, if any.
    pub fn next_step(&self) -> Option<&ExecutableStep> {
        self.steps.get(self.playhead.index() + 1)
    }

    pub fn zone_time(&self) -> &ZoneTime {
        &self.zone_time
    }

    /// Remaining share of the current time step, for progress rings.
    pub fn step_progress(&self) -> f32 {
        self.timer.remaining_ratio()
    }

    /// Blocks whose every step is behind the cursor.
    pub fn completed_blocks(&self) -> BTreeSet<usize> {
        let behind = self.playhead.steps_behind();
        let mut pending = BTreeSet::new();
        let mut seen = BTreeSet::new();

        for step in &self.steps {
            seen.insert(step.block_index);
            if step.global_index >= behind {
                pending.insert(step.block_index);
            }
        }

        seen.difference(&pending).copied().collect()
    }
}

impl ExecutionSession for AerobicSession {
    type Summary = AerobicSummary;

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
        self.playhead.completed()
    }

    fn total_count(&self) -> usize {
        self.steps.len()
    }

    fn timer(&self) -> &StepTimer {
        &self.timer
    }

    fn tick(&mut self) -> TickOutcome {
        if !self.playhead.is_running() {
            return TickOutcome::Idle;
        }
        let Some(zone) = self.current_step().map(|s| s.step.intensity) else {
            return TickOutcome::Idle;
        };

        self.playhead.count_second();
        self.zone_time.add(zone, 1);

        match self.timer.tick() {
            TimerTick::Running => TickOutcome::Counted,
            TimerTick::Expired => {
                let outcome = self.playhead.complete_and_advance();
                self.sync_timer(&outcome);
                outcome
            }
        }
    }

    fn toggle_pause(&mut self) -> TickOutcome {
        self.playhead.toggle_pause()
    }

    fn skip_forward(&mut self) -> TickOutcome {
        if !self.playhead.is_navigable() {
            return TickOutcome::Idle;
        }
        let outcome = self.playhead.complete_and_advance();
        self.sync_timer(&outcome);
        outcome
    }

    fn skip_backward(&mut self) -> TickOutcome {
        if !self.playhead.is_navigable() {
            return TickOutcome::Idle;
        }
        let outcome = self.playhead.back();
        self.sync_timer(&outcome);
        outcome
    }

    fn stop(&mut self) -> TickOutcome {
        self.playhead.stop()
    }

    fn summary(&self) -> AerobicSummary {
        AerobicSummary::new(
            self.playhead.elapsed_seconds(),
            self.playhead.completed(),
            self.steps.len(),
            &self.zone_time,
            self.completed_blocks().len(),
            self.block_count,
        )
    }
}
