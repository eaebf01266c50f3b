//! Autoplay session: a hands-free countdown through every item.

use std::time::Duration;

use crate::execution::session::{ExecutionSession, Playhead, TickOutcome};
use crate::execution::timer::{StepTimer, TimerTick};
use crate::metrics::summary::AutoplaySummary;
use crate::storage::config::ExecutionSettings;
use crate::workouts::autoplay::AutoplayWorkout;
use crate::workouts::flatten::{flatten_autoplay, FlatItem};
use crate::workouts::types::{SessionStatus, WorkoutError};

/// Execution state of an autoplay workout.
#[derive(Debug, Clone)]
pub struct AutoplaySession {
    name: String,
    items: Vec<FlatItem>,
    playhead: Playhead,
    timer: StepTimer,
    prestart_remaining: u32,
    work_seconds: u32,
    rest_seconds: u32,
}

impl AutoplaySession {
    /// Flatten `workout` and enter the lead-in countdown from `prestart_count`.
    pub fn new(workout: &AutoplayWorkout, prestart_count: u32) -> Result<Self, WorkoutError> {
        let items = flatten_autoplay(workout);
        let first = items.first().ok_or(WorkoutError::EmptyWorkout)?;
        let timer = StepTimer::count_down(first.duration());

        tracing::info!("Autoplay session '{}' ready: {} items", workout.name, items.len());

        Ok(Self {
            name: workout.name.clone(),
            playhead: Playhead::new(items.len(), SessionStatus::Prestart),
            items,
            timer,
            prestart_remaining: prestart_count,
            work_seconds: 0,
            rest_seconds: 0,
        })
    }

    fn sync_timer(&mut self, outcome: &TickOutcome) {
        match outcome {
            TickOutcome::StepChanged { .. } => {
                if let Some(item) = self.items.get(self.playhead.index()) {
                    self.timer = StepTimer::count_down(item.duration());
                }
            }
            TickOutcome::TimerReset => self.timer.reset(),
            _ => {}
        }
    }

    fn prestart_tick(&mut self) -> TickOutcome {
        if self.prestart_remaining == 0 {
            self.playhead.set_status(SessionStatus::Running);
            tracing::info!("Autoplay session '{}' started", self.name);
            return TickOutcome::Started;
        }
        self.prestart_remaining -= 1;
        TickOutcome::PrestartCount(self.prestart_remaining)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[FlatItem] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&FlatItem> {
        self.items.get(self.playhead.index())
    }

    pub fn next_item(&self) -> Option<&FlatItem> {
        self.items.get(self.playhead.index() + 1)
    }

    /// Lead-in value still to show; 0 reads as "GO".
    pub fn prestart_remaining(&self) -> u32 {
        self.prestart_remaining
    }

    pub fn work_seconds(&self) -> u32 {
        self.work_seconds
    }

    pub fn rest_seconds(&self) -> u32 {
        self.rest_seconds
    }

    pub fn step_progress(&self) -> f32 {
        self.timer.remaining_ratio()
    }
}

impl ExecutionSession for AutoplaySession {
    type Summary = AutoplaySummary;

    fn status(&self) -> SessionStatus {
        self.playhead.status()
    }

    fn cursor(&self) -> usize {
        self.playhead.index()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn elapsed_seconds(&self) -> u32 {
        self.playhead.elapsed_seconds()
    }

    fn completed_count(&self) -> usize {
        self.playhead.completed()
    }

    fn total_count(&self) -> usize {
        self.items.len()
    }

    fn timer(&self) -> &StepTimer {
        &self.timer
    }

    fn display_seconds(&self) -> u32 {
        match self.playhead.status() {
            SessionStatus::Prestart => self.prestart_remaining,
            _ => self.timer.value(),
        }
    }

    fn tick(&mut self) -> TickOutcome {
        match self.playhead.status() {
            SessionStatus::Prestart => return self.prestart_tick(),
            SessionStatus::Running => {}
            _ => return TickOutcome::Idle,
        }
        let Some(is_exercise) = self.current_item().map(FlatItem::is_exercise) else {
            return TickOutcome::Idle;
        };

        self.playhead.count_second();
        if is_exercise {
            self.work_seconds += 1;
        } else {
            self.rest_seconds += 1;
        }

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

    fn tick_period(&self, settings: &ExecutionSettings) -> Duration {
        match self.playhead.status() {
            SessionStatus::Prestart => Duration::from_millis(settings.prestart_interval_ms),
            _ => Duration::from_millis(settings.tick_interval_ms),
        }
    }

    fn summary(&self) -> AutoplaySummary {
        AutoplaySummary::new(
            self.playhead.elapsed_seconds(),
            self.playhead.completed(),
            self.items.len(),
            self.work_seconds,
            self.rest_seconds,
        )
    }
}
