//! Workout models, editors and the flattening of nested workouts.

pub mod aerobic;
pub mod autoplay;
pub mod document;
pub mod duration;
pub mod flatten;
pub mod ids;
pub mod segments;
pub mod strict;
pub mod types;

pub use aerobic::{AerobicEditor, AerobicWorkout, BlockStep, DurationType, Sport, WorkoutBlock};
pub use autoplay::{AutoplayBlock, AutoplayEditor, AutoplayItem, AutoplayItemKind, AutoplayWorkout};
pub use document::{load_document, parse_document, WorkoutDocument};
pub use flatten::{flatten_aerobic, flatten_autoplay, flatten_strict, ExecutableStep, FlatItem, FocusStep};
pub use ids::{IdGenerator, SequentialIds, SharedIds, UuidIds};
pub use segments::{Segment, SupersetMeta};
pub use strict::{ExerciseKind, Reps, SetRef, StrictEditor, StrictExercise, StrictSet, StrictWorkout};
pub use types::{AddFromLibrary, LibraryExercise, SessionStatus, WorkoutError};
