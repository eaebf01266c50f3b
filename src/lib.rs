//! RepFlow - Workout Sequencing and Timer Engine
//!
//! Models aerobic, autoplay and strict workouts, flattens their nested
//! structure into a linear play order and runs that order against a clock.

pub mod execution;
pub mod metrics;
pub mod storage;
pub mod workouts;

// Re-export commonly used types
pub use execution::{spawn_session, AerobicSession, AutoplaySession, ExecutionSession, StrictSession};
pub use storage::config::AppConfig;
pub use workouts::document::WorkoutDocument;
