//! Per-step timer.

use serde::Serialize;

/// How a step timer behaves on each running tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Counts down from the step length and expires
    CountDown,
    /// Counts up until the user advances
    CountUp,
    /// Not driven by ticks at all
    Manual,
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    Running,
    Expired,
}

/// Timer for the step under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepTimer {
    mode: TimerMode,
    initial: u32,
    value: u32,
}

impl StepTimer {
    pub fn count_down(seconds: u32) -> Self {
        Self {
            mode: TimerMode::CountDown,
            initial: seconds,
            value: seconds,
        }
    }

    pub fn count_up() -> Self {
        Self {
            mode: TimerMode::CountUp,
            initial: 0,
            value: 0,
        }
    }

    pub fn manual() -> Self {
        Self {
            mode: TimerMode::Manual,
            initial: 0,
            value: 0,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Current display value in seconds.
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// Back to the initial value.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }

    /// Advance by one second.
    ///
    /// A countdown at 1 (or already at 0) expires on this tick, so a step of
    /// N seconds expires on its N-th tick.
    pub fn tick(&mut self) -> TimerTick {
        match self.mode {
            TimerMode::CountDown => {
                if self.value <= 1 {
                    self.value = 0;
                    TimerTick::Expired
                } else {
                    self.value -= 1;
                    TimerTick::Running
                }
            }
            TimerMode::CountUp => {
                self.value = self.value.saturating_add(1);
                TimerTick::Running
            }
            TimerMode::Manual => TimerTick::Running,
        }
    }

    /// Shift a countdown by `delta` seconds, never below zero.
    pub fn adjust(&mut self, delta: i32) {
        if self.mode != TimerMode::CountDown {
            return;
        }
        self.value = self.value.saturating_add_signed(delta);
        self.initial = self.initial.max(self.value);
    }

    /// Remaining share of a countdown (1.0 = untouched), 0 when there is nothing to count.
    pub fn remaining_ratio(&self) -> f32 {
        if self.mode != TimerMode::CountDown || self.initial == 0 {
            return 0.0;
        }
        self.value as f32 / self.initial as f32
    }
}
