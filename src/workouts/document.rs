//! JSON workout documents tagged by workout type.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::workouts::aerobic::AerobicWorkout;
use crate::workouts::autoplay::AutoplayWorkout;
use crate::workouts::strict::StrictWorkout;
use crate::workouts::types::WorkoutError;

/// Any workout, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkoutDocument {
    Aerobic(AerobicWorkout),
    Autoplay(AutoplayWorkout),
    Strict(StrictWorkout),
}

impl WorkoutDocument {
    pub fn name(&self) -> &str {
        match self {
            WorkoutDocument::Aerobic(w) => &w.name,
            WorkoutDocument::Autoplay(w) => &w.name,
            WorkoutDocument::Strict(w) => &w.name,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WorkoutDocument::Aerobic(_) => "aerobic",
            WorkoutDocument::Autoplay(_) => "autoplay",
            WorkoutDocument::Strict(_) => "strict",
        }
    }

    pub fn to_json(&self) -> Result<String, WorkoutError> {
        serde_json::to_string_pretty(self).map_err(|e| WorkoutError::Parse(e.to_string()))
    }
}

/// Parse a workout document from JSON.
pub fn parse_document(json: &str) -> Result<WorkoutDocument, WorkoutError> {
    serde_json::from_str(json).map_err(|e| WorkoutError::Parse(e.to_string()))
}

/// Read and parse a workout document.
pub fn load_document(path: &Path) -> Result<WorkoutDocument, WorkoutError> {
    let content = std::fs::read_to_string(path).map_err(|e| WorkoutError::Io(e.to_string()))?;

    let document = parse_document(&content)?;
    tracing::info!("Loaded {} workout '{}' from {}", document.kind(), document.name(), path.display());

    Ok(document)
}
