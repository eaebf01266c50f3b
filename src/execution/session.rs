//! Common execution-session contract and cursor bookkeeping.

use std::time::Duration;

use crate::execution::timer::StepTimer;
use crate::metrics::summary::progress_percent;
use crate::storage::config::ExecutionSettings;
use crate::workouts::types::SessionStatus;

/// What a tick or a navigation command did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed
    Idle,
    /// A second was accrued on the current step
    Counted,
    /// Lead-in countdown moved to this value
    PrestartCount(u32),
    /// Lead-in is over, the first step is running
    Started,
    /// The cursor moved
    StepChanged { from: usize, to: usize },
    /// The current step timer went back to its initial value
    TimerReset,
    /// A rest period of this many seconds began after a set
    RestStarted(u32),
    /// Rest period now has this many seconds left
    RestAdjusted(u32),
    /// A set was checked or unchecked
    SetToggled {
        exercise_id: String,
        set_id: String,
        completed: bool,
    },
    Paused,
    Resumed,
    Finished,
}

impl TickOutcome {
    /// Whether the step timer was (re)started, so an external ticker must
    /// restart its period as well.
    pub fn restarts_timer(&self) -> bool {
        matches!(
            self,
            TickOutcome::Started
                | TickOutcome::StepChanged { .. }
                | TickOutcome::TimerReset
                | TickOutcome::RestStarted(_)
                | TickOutcome::Resumed
        )
    }
}

/// User actions delivered to a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    TogglePause,
    SkipForward,
    SkipBackward,
    Stop,
    /// Check off the current set (strict)
    CompleteSet,
    /// Flip completion of any set (strict)
    ToggleSet { exercise_id: String, set_id: String },
    /// Shift the active rest period (strict)
    AdjustRest(i32),
}

impl SessionCommand {
    /// Parse a console command; bare `+` / `-` shift the rest by `rest_step` seconds.
    pub fn parse(input: &str, rest_step: u32) -> Option<Self> {
        let input = input.trim();
        let step = i32::try_from(rest_step).unwrap_or(i32::MAX);

        let command = match input {
            "p" | "pause" => SessionCommand::TogglePause,
            "n" | "next" => SessionCommand::SkipForward,
            "b" | "back" => SessionCommand::SkipBackward,
            "s" | "stop" => SessionCommand::Stop,
            "c" | "done" => SessionCommand::CompleteSet,
            "+" => SessionCommand::AdjustRest(step),
            "-" => SessionCommand::AdjustRest(-step),
            _ => {
                if let Some(args) = input.strip_prefix("t ") {
                    let mut args = args.split_whitespace();
                    let (exercise_id, set_id) = (args.next()?, args.next()?);
                    if args.next().is_some() {
                        return None;
                    }
                    SessionCommand::ToggleSet {
                        exercise_id: exercise_id.to_string(),
                        set_id: set_id.to_string(),
                    }
                } else if input.starts_with(['+', '-']) {
                    SessionCommand::AdjustRest(input.parse().ok()?)
                } else {
                    return None;
                }
            }
        };
        Some(command)
    }
}

/// A playable workout session.
pub trait ExecutionSession {
    /// End-of-session statistics.
    type Summary;

    fn status(&self) -> SessionStatus;

    /// Index of the current step in the flattened sequence.
    fn cursor(&self) -> usize;

    /// Number of flattened steps.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn elapsed_seconds(&self) -> u32;

    /// Completed units (steps, items or sets).
    fn completed_count(&self) -> usize;

    /// Units counted toward completion.
    fn total_count(&self) -> usize;

    /// Timer of the current step.
    fn timer(&self) -> &StepTimer;

    /// Seconds to display on the main clock.
    fn display_seconds(&self) -> u32 {
        self.timer().value()
    }

    /// Advance one tick of wall-clock time.
    fn tick(&mut self) -> TickOutcome;

    fn toggle_pause(&mut self) -> TickOutcome;

    fn skip_forward(&mut self) -> TickOutcome;

    fn skip_backward(&mut self) -> TickOutcome;

    fn stop(&mut self) -> TickOutcome;

    fn summary(&self) -> Self::Summary;

    /// Apply a user command.
    fn handle(&mut self, command: &SessionCommand) -> TickOutcome {
        match command {
            SessionCommand::TogglePause => self.toggle_pause(),
            SessionCommand::SkipForward => self.skip_forward(),
            SessionCommand::SkipBackward => self.skip_backward(),
            SessionCommand::Stop => self.stop(),
            other => {
                tracing::warn!("Command {:?} not supported by this session", other);
                TickOutcome::Idle
            }
        }
    }

    /// Wall-clock length of one tick in the current status.
    fn tick_period(&self, settings: &ExecutionSettings) -> Duration {
        Duration::from_millis(settings.tick_interval_ms)
    }

    fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }

    /// Overall completion in percent, 0 for an empty session.
    fn progress_percent(&self) -> f32 {
        progress_percent(self.completed_count(), self.total_count())
    }
}

/// Cursor, status and shared counters of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playhead {
    index: usize,
    len: usize,
    status: SessionStatus,
    elapsed_seconds: u32,
    completed: usize,
    ran_out: bool,
}

impl Playhead {
    pub fn new(len: usize, status: SessionStatus) -> Self {
        Self {
            index: 0,
            len,
            status,
            elapsed_seconds: 0,
            completed: 0,
            ran_out: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_navigable(&self) -> bool {
        self.status.is_navigable()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.len
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Steps fully behind the cursor, counting the last one when the
    /// sequence ran out rather than being stopped.
    pub fn steps_behind(&self) -> usize {
        self.index + usize::from(self.ran_out)
    }

    /// Accrue one second of elapsed time.
    pub fn count_second(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
    }

    /// Move to the next step, or finish at the last one.
    pub fn advance(&mut self) -> TickOutcome {
        if self.is_last() {
            self.status = SessionStatus::Finished;
            self.ran_out = true;
            tracing::info!("Session finished at step {}", self.index);
            return TickOutcome::Finished;
        }
        let from = self.index;
        self.index += 1;
        tracing::debug!("Advanced to step {}", self.index);
        TickOutcome::StepChanged { from, to: self.index }
    }

    /// Count the current step as completed, then advance.
    pub fn complete_and_advance(&mut self) -> TickOutcome {
        self.completed += 1;
        self.advance()
    }

    /// Step back one, or ask for a timer reset at the first step.
    pub fn back(&mut self) -> TickOutcome {
        if self.index == 0 {
            return TickOutcome::TimerReset;
        }
        let from = self.index;
        self.index -= 1;
        tracing::debug!("Moved back to step {}", self.index);
        TickOutcome::StepChanged { from, to: self.index }
    }

    pub fn toggle_pause(&mut self) -> TickOutcome {
        match self.status {
            SessionStatus::Running => {
                self.status = SessionStatus::Paused;
                tracing::info!("Session paused");
                TickOutcome::Paused
            }
            SessionStatus::Paused => {
                self.status = SessionStatus::Running;
                tracing::info!("Session resumed");
                TickOutcome::Resumed
            }
            _ => TickOutcome::Idle,
        }
    }

    /// Finish immediately without completing anything else.
    pub fn stop(&mut self) -> TickOutcome {
        if self.status == SessionStatus::Finished {
            return TickOutcome::Idle;
        }
        self.status = SessionStatus::Finished;
        tracing::info!("Session stopped at step {} of {}", self.index, self.len);
        TickOutcome::Finished
    }
}
