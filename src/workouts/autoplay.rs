//! Autoplay workouts: a timed sequence of exercise and rest items.
//!
//! Items may reference a block by id; a contiguous run of items sharing a
//! block id plays `rounds` times.

use serde::{Deserialize, Serialize};

use crate::storage::config::EditorDefaults;
use crate::workouts::ids::{default_ids, SharedIds};
use crate::workouts::types::{AddFromLibrary, LibraryExercise, WorkoutError};

/// Duration presets offered by the item editor, in seconds.
pub const DURATION_PRESETS: [u32; 8] = [10, 15, 20, 30, 45, 60, 90, 120];

/// Kind of autoplay item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayItemKind {
    Exercise,
    Rest,
}

/// One timed entry of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoplayItem {
    pub id: String,
    pub kind: AutoplayItemKind,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub equipment: String,
    /// Seconds
    pub duration: u32,
    /// Free text shown under the name
    #[serde(default)]
    pub label: String,
    /// Consecutive plays of this item
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

fn default_repeat() -> u32 {
    1
}

impl AutoplayItem {
    pub fn is_exercise(&self) -> bool {
        self.kind == AutoplayItemKind::Exercise
    }

    /// Effective repeat count (never below one).
    pub fn plays(&self) -> u32 {
        self.repeat.max(1)
    }
}

/// A named group of items played `rounds` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayBlock {
    pub id: String,
    pub name: String,
    pub rounds: u32,
}

/// A complete autoplay workout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoplayWorkout {
    pub name: String,
    #[serde(default)]
    pub items: Vec<AutoplayItem>,
    #[serde(default)]
    pub blocks: Vec<AutoplayBlock>,
}

impl AutoplayWorkout {
    pub fn block(&self, block_id: &str) -> Option<&AutoplayBlock> {
        self.blocks.iter().find(|b| b.id == block_id)
    }
}

/// Build a block named `Block A`, `Block B`, ... from its position.
pub fn make_block(ids: &SharedIds, name: Option<String>, position: usize) -> AutoplayBlock {
    let letter = char::from(b'A' + (position % 26) as u8);
    AutoplayBlock {
        id: ids.next_id("block"),
        name: name.unwrap_or_else(|| format!("Block {}", letter)),
        rounds: 1,
    }
}

/// Build an exercise item from a library pick.
pub fn make_exercise_item(entry: &LibraryExercise, ids: &SharedIds, defaults: &EditorDefaults) -> AutoplayItem {
    AutoplayItem {
        id: ids.next_id("item"),
        kind: AutoplayItemKind::Exercise,
        name: entry.name.clone(),
        category: entry.category.clone(),
        equipment: entry.equipment.clone(),
        duration: defaults.autoplay_exercise_secs,
        label: String::new(),
        repeat: 1,
        block_id: None,
    }
}

/// Build a rest item.
pub fn make_rest_item(duration: Option<u32>, ids: &SharedIds, defaults: &EditorDefaults) -> AutoplayItem {
    AutoplayItem {
        id: ids.next_id("item"),
        kind: AutoplayItemKind::Rest,
        name: "Rest".to_string(),
        category: String::new(),
        equipment: String::new(),
        duration: duration.unwrap_or(defaults.autoplay_rest_secs),
        label: String::new(),
        repeat: 1,
        block_id: None,
    }
}

/// Editing handle over an autoplay workout.
pub struct AutoplayEditor {
    workout: AutoplayWorkout,
    ids: SharedIds,
    defaults: EditorDefaults,
}

impl AutoplayEditor {
    pub fn new(workout: AutoplayWorkout, ids: SharedIds, defaults: EditorDefaults) -> Self {
        let mut editor = Self { workout, ids, defaults };
        for block in &mut editor.workout.blocks {
            block.rounds = block.rounds.max(1);
        }
        for item in &mut editor.workout.items {
            item.repeat = item.repeat.max(1);
        }
        editor
    }

    pub fn workout(&self) -> &AutoplayWorkout {
        &self.workout
    }

    pub fn into_workout(self) -> AutoplayWorkout {
        self.workout
    }

    fn item_mut(&mut self, item_id: &str) -> Result<&mut AutoplayItem, WorkoutError> {
        self.workout
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| WorkoutError::NotFound(item_id.to_string()))
    }

    /// Append a rest item.
    pub fn add_rest(&mut self, duration: Option<u32>) -> String {
        let item = make_rest_item(duration, &self.ids, &self.defaults);
        let id = item.id.clone();
        self.workout.items.push(item);
        id
    }

    pub fn remove_item(&mut self, item_id: &str) -> Result<AutoplayItem, WorkoutError> {
        let pos = self
            .workout
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| WorkoutError::NotFound(item_id.to_string()))?;
        Ok(self.workout.items.remove(pos))
    }

    /// Insert a copy of the item right after it.
    pub fn duplicate_item(&mut self, item_id: &str) -> Result<String, WorkoutError> {
        let pos = self
            .workout
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| WorkoutError::NotFound(item_id.to_string()))?;
        let copy = AutoplayItem {
            id: self.ids.next_id("item"),
            ..self.workout.items[pos].clone()
        };
        let id = copy.id.clone();
        self.workout.items.insert(pos + 1, copy);
        Ok(id)
    }

    /// Move an item to a new position.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), WorkoutError> {
        let len = self.workout.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(WorkoutError::IndexOutOfRange { index, len });
            }
        }
        let item = self.workout.items.remove(from);
        self.workout.items.insert(to, item);
        Ok(())
    }

    pub fn set_duration(&mut self, item_id: &str, seconds: u32) -> Result<(), WorkoutError> {
        self.item_mut(item_id)?.duration = seconds;
        Ok(())
    }

    /// Set the repeat count, clamped to at least one.
    pub fn set_repeat(&mut self, item_id: &str, repeat: u32) -> Result<u32, WorkoutError> {
        let item = self.item_mut(item_id)?;
        item.repeat = repeat.max(1);
        Ok(item.repeat)
    }

    pub fn set_label(&mut self, item_id: &str, label: impl Into<String>) -> Result<(), WorkoutError> {
        self.item_mut(item_id)?.label = label.into();
        Ok(())
    }

    /// Create a block and return its id.
    pub fn add_block(&mut self, name: Option<String>) -> String {
        let block = make_block(&self.ids, name, self.workout.blocks.len());
        let id = block.id.clone();
        self.workout.blocks.push(block);
        id
    }

    /// Remove a block; its items become loose.
    pub fn remove_block(&mut self, block_id: &str) -> Result<AutoplayBlock, WorkoutError> {
        let pos = self
            .workout
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| WorkoutError::NotFound(block_id.to_string()))?;
        for item in &mut self.workout.items {
            if item.block_id.as_deref() == Some(block_id) {
                item.block_id = None;
            }
        }
        Ok(self.workout.blocks.remove(pos))
    }

    /// Set a block's round count, clamped to at least one.
    pub fn set_rounds(&mut self, block_id: &str, rounds: u32) -> Result<u32, WorkoutError> {
        let block = self
            .workout
            .blocks
            .iter_mut()
            .find(|b| b.id == block_id)
            .ok_or_else(|| WorkoutError::NotFound(block_id.to_string()))?;
        block.rounds = rounds.max(1);
        Ok(block.rounds)
    }

    /// Attach an item to a block, or detach it with `None`.
    pub fn assign_block(&mut self, item_id: &str, block_id: Option<&str>) -> Result<(), WorkoutError> {
        if let Some(block_id) = block_id {
            if self.workout.block(block_id).is_none() {
                return Err(WorkoutError::NotFound(block_id.to_string()));
            }
        }
        self.item_mut(item_id)?.block_id = block_id.map(str::to_string);
        Ok(())
    }
}

impl Default for AutoplayEditor {
    fn default() -> Self {
        Self::new(AutoplayWorkout::default(), default_ids(), EditorDefaults::default())
    }
}

impl AddFromLibrary for AutoplayEditor {
    fn add(&mut self, exercise: &LibraryExercise) -> String {
        let item = make_exercise_item(exercise, &self.ids, &self.defaults);
        let id = item.id.clone();
        tracing::debug!("Added autoplay item {}", item.name);
        self.workout.items.push(item);
        id
    }
}
