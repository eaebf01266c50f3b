//! Aerobic workouts: blocks of zone-targeted steps, each block repeated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::zones::IntensityZone;
use crate::workouts::duration::{format_duration_label, parse_duration_to_seconds};
use crate::workouts::ids::{default_ids, SharedIds};
use crate::workouts::types::WorkoutError;

/// How a step's length is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DurationType {
    /// Fixed time, `duration` is `HH:MM:SS`
    #[default]
    Time,
    /// Distance in meters, completed by hand
    Distance,
}

/// Sport the plan is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    #[default]
    Running,
    Cycling,
    Swimming,
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sport::Running => write!(f, "Running"),
            Sport::Cycling => write!(f, "Cycling"),
            Sport::Swimming => write!(f, "Swimming"),
        }
    }
}

/// A single step inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStep {
    pub id: String,
    pub name: String,
    pub duration_type: DurationType,
    /// `HH:MM:SS` for time steps, meters for distance steps
    pub duration: String,
    pub intensity: IntensityZone,
    /// Reserved
    #[serde(default = "default_level")]
    pub level: u32,
}

fn default_level() -> u32 {
    1
}

impl BlockStep {
    pub fn is_timed(&self) -> bool {
        self.duration_type == DurationType::Time
    }

    /// Planned seconds for time steps, 0 for distance steps.
    pub fn duration_seconds(&self) -> u32 {
        if self.is_timed() {
            parse_duration_to_seconds(&self.duration)
        } else {
            0
        }
    }

    /// Distance in meters for distance steps.
    pub fn distance_meters(&self) -> Option<f32> {
        match self.duration_type {
            DurationType::Distance => self.duration.trim().parse().ok(),
            DurationType::Time => None,
        }
    }

    /// Short label: `5min`, `1min 30s`, `400m`.
    pub fn label(&self) -> String {
        match self.duration_type {
            DurationType::Distance => format!("{}m", self.duration.trim()),
            DurationType::Time => format_duration_label(self.duration_seconds()),
        }
    }
}

/// A block of steps executed `repetitions` times in a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBlock {
    pub id: String,
    pub name: String,
    pub repetitions: u32,
    #[serde(default)]
    pub steps: Vec<BlockStep>,
}

impl WorkoutBlock {
    /// Planned seconds of one pass through the block.
    pub fn pass_seconds(&self) -> u32 {
        self.steps.iter().map(BlockStep::duration_seconds).sum()
    }

    /// Planned seconds including repetitions.
    pub fn total_seconds(&self) -> u32 {
        self.pass_seconds().saturating_mul(self.repetitions)
    }
}

/// A complete aerobic plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerobicWorkout {
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sport: Sport,
    #[serde(default)]
    pub blocks: Vec<WorkoutBlock>,
}

impl AerobicWorkout {
    pub fn new(name: impl Into<String>, sport: Sport) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: None,
            description: String::new(),
            sport,
            blocks: Vec::new(),
        }
    }

    /// Whether `date` falls inside the scheduled window (open ends allowed).
    pub fn is_scheduled_on(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start) && self.end_date.map_or(true, |end| date <= end)
    }
}

/// Build a ten-minute zone 1 time step.
pub fn make_step(ids: &SharedIds, name: impl Into<String>) -> BlockStep {
    BlockStep {
        id: ids.next_id("step"),
        name: name.into(),
        duration_type: DurationType::Time,
        duration: "00:10:00".to_string(),
        intensity: IntensityZone::Z1,
        level: 1,
    }
}

/// Build a block holding one default step.
pub fn make_block(ids: &SharedIds, name: impl Into<String>) -> WorkoutBlock {
    WorkoutBlock {
        id: ids.next_id("block"),
        name: name.into(),
        repetitions: 1,
        steps: vec![make_step(ids, "Step 1")],
    }
}

/// The starter plan: warm-up, three main repetitions, cool-down.
pub fn default_blocks(ids: &SharedIds) -> Vec<WorkoutBlock> {
    let timed = |name: &str, duration: &str, zone: IntensityZone| BlockStep {
        id: ids.next_id("step"),
        name: name.to_string(),
        duration_type: DurationType::Time,
        duration: duration.to_string(),
        intensity: zone,
        level: 1,
    };

    vec![
        WorkoutBlock {
            id: ids.next_id("block"),
            name: "Warm-up".to_string(),
            repetitions: 1,
            steps: vec![timed("Step 1", "00:10:00", IntensityZone::Z1)],
        },
        WorkoutBlock {
            id: ids.next_id("block"),
            name: "Main".to_string(),
            repetitions: 3,
            steps: vec![timed("Step 1", "00:05:00", IntensityZone::Z3)],
        },
        WorkoutBlock {
            id: ids.next_id("block"),
            name: "Cool-down".to_string(),
            repetitions: 1,
            steps: vec![timed("Step 1", "00:05:00", IntensityZone::Z1)],
        },
    ]
}

/// Editing handle over an aerobic plan.
pub struct AerobicEditor {
    workout: AerobicWorkout,
    ids: SharedIds,
}

impl AerobicEditor {
    pub fn new(workout: AerobicWorkout, ids: SharedIds) -> Self {
        let mut editor = Self { workout, ids };
        for block in &mut editor.workout.blocks {
            block.repetitions = block.repetitions.max(1);
        }
        editor
    }

    /// Editor pre-filled with the starter plan.
    pub fn with_default_plan(name: impl Into<String>, sport: Sport, ids: SharedIds) -> Self {
        let mut workout = AerobicWorkout::new(name, sport);
        workout.blocks = default_blocks(&ids);
        Self::new(workout, ids)
    }

    pub fn workout(&self) -> &AerobicWorkout {
        &self.workout
    }

    pub fn into_workout(self) -> AerobicWorkout {
        self.workout
    }

    fn block_mut(&mut self, block_id: &str) -> Result<&mut WorkoutBlock, WorkoutError> {
        self.workout
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or_else(|| WorkoutError::NotFound(block_id.to_string()))
    }

    /// Append a new block with one default step.
    pub fn add_block(&mut self) -> String {
        let name = format!("Block {}", self.workout.blocks.len() + 1);
        let block = make_block(&self.ids, name);
        let id = block.id.clone();
        self.workout.blocks.push(block);
        id
    }

    pub fn remove_block(&mut self, block_id: &str) -> Result<WorkoutBlock, WorkoutError> {
        let pos = self
            .workout
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| WorkoutError::NotFound(block_id.to_string()))?;
        Ok(self.workout.blocks.remove(pos))
    }

    /// Move a block to a new position.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), WorkoutError> {
        let len = self.workout.blocks.len();
        for index in [from, to] {
            if index >= len {
                return Err(WorkoutError::IndexOutOfRange { index, len });
            }
        }
        let block = self.workout.blocks.remove(from);
        self.workout.blocks.insert(to, block);
        Ok(())
    }

    /// Set a block's repetition count, clamped to at least one.
    pub fn set_repetitions(&mut self, block_id: &str, repetitions: u32) -> Result<u32, WorkoutError> {
        let block = self.block_mut(block_id)?;
        block.repetitions = repetitions.max(1);
        Ok(block.repetitions)
    }

    /// Append a default step to a block.
    pub fn add_step(&mut self, block_id: &str) -> Result<String, WorkoutError> {
        let ids = self.ids.clone();
        let block = self.block_mut(block_id)?;
        let step = make_step(&ids, format!("Step {}", block.steps.len() + 1));
        let id = step.id.clone();
        block.steps.push(step);
        Ok(id)
    }

    pub fn remove_step(&mut self, block_id: &str, step_id: &str) -> Result<BlockStep, WorkoutError> {
        let block = self.block_mut(block_id)?;
        let pos = block
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| WorkoutError::NotFound(step_id.to_string()))?;
        Ok(block.steps.remove(pos))
    }

    /// Edit one step in place.
    pub fn update_step<F>(&mut self, block_id: &str, step_id: &str, f: F) -> Result<(), WorkoutError>
    where
        F: FnOnce(&mut BlockStep),
    {
        let block = self.block_mut(block_id)?;
        let step = block
            .steps
            .iter_mut()
            .find(|s| s.id == step_id)
            .ok_or_else(|| WorkoutError::NotFound(step_id.to_string()))?;
        f(step);
        Ok(())
    }
}

impl Default for AerobicEditor {
    fn default() -> Self {
        Self::new(AerobicWorkout::new("", Sport::default()), default_ids())
    }
}
