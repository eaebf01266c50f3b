//! Workout types shared by all three workout shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current status of a workout execution session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Lead-in countdown before the first step (autoplay only)
    Prestart,
    /// Timers are running
    #[default]
    Running,
    /// Timers are frozen, nothing is lost
    Paused,
    /// Terminal: the summary is available
    Finished,
}

impl SessionStatus {
    /// Whether navigation commands apply in this status.
    pub fn is_navigable(&self) -> bool {
        matches!(self, SessionStatus::Running | SessionStatus::Paused)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStatus::Prestart => write!(f, "Get Ready"),
            SessionStatus::Running => write!(f, "Running"),
            SessionStatus::Paused => write!(f, "Paused"),
            SessionStatus::Finished => write!(f, "Finished"),
        }
    }
}

/// An entry picked from the exercise library panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryExercise {
    pub name: String,
    pub category: String,
    pub equipment: String,
}

impl LibraryExercise {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        equipment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            equipment: equipment.into(),
        }
    }
}

/// Editors that accept exercises picked in the library panel.
///
/// The library holds a `&mut dyn AddFromLibrary` to whichever editor is
/// active and calls `add` directly.
pub trait AddFromLibrary {
    /// Append the exercise and return the id of the new entity.
    fn add(&mut self, exercise: &LibraryExercise) -> String;
}

/// Errors related to workout editing and execution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkoutError {
    /// Nothing to execute after flattening
    #[error("Workout has no steps to execute")]
    EmptyWorkout,

    /// Entity id not present in the workout
    #[error("Not found: {0}")]
    NotFound(String),

    /// Position outside of the edited list
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Workout document could not be decoded
    #[error("Failed to parse workout: {0}")]
    Parse(String),

    /// Workout document could not be read
    #[error("IO error: {0}")]
    Io(String),
}
