//! Strict workouts: exercises with ordered sets, optionally linked into supersets.
//!
//! A superset is never stored. It is the run of consecutive non-rest
//! exercises whose `superset_with_next` flags chain them together, so every
//! structural edit here ends by re-normalizing those flags.

use serde::{Deserialize, Serialize};

use crate::storage::config::EditorDefaults;
use crate::workouts::ids::{default_ids, SharedIds};
use crate::workouts::types::{AddFromLibrary, LibraryExercise, WorkoutError};

/// What a strict exercise measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    #[default]
    WeightReps,
    Duration,
    Distance,
    /// A standalone rest block with no sets
    Rest,
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseKind::WeightReps => write!(f, "Weight & Reps"),
            ExerciseKind::Duration => write!(f, "Duration"),
            ExerciseKind::Distance => write!(f, "Distance"),
            ExerciseKind::Rest => write!(f, "Rest"),
        }
    }
}

/// Repetition target of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Fixed(u32),
    /// Inclusive `[min, max]` range
    Range(u32, u32),
}

impl Reps {
    /// Repetitions credited for volume: the fixed count or the range floor.
    pub fn credited(&self) -> u32 {
        match self {
            Reps::Fixed(n) => *n,
            Reps::Range(min, max) => (*min).min(*max),
        }
    }
}

/// One set of a strict exercise.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrictSet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    /// Load in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
    /// Rest after this set in seconds (0 = off)
    #[serde(default)]
    pub rest: u32,
}

impl StrictSet {
    /// `weight × reps`, zero when either is missing.
    pub fn volume(&self) -> f64 {
        match (self.weight, self.reps) {
            (Some(weight), Some(reps)) => weight as f64 * reps.credited() as f64,
            _ => 0.0,
        }
    }
}

/// An exercise in a strict workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrictExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub kind: ExerciseKind,
    #[serde(default)]
    pub sets: Vec<StrictSet>,
    #[serde(default)]
    pub superset_with_next: bool,
    #[serde(default)]
    pub notes: String,
    /// Length of a `Rest` exercise in seconds
    #[serde(default)]
    pub rest_duration: u32,
    /// Rest between superset rounds, read from the first member of a group
    #[serde(default = "default_round_rest")]
    pub rest_between_rounds: u32,
}

fn default_round_rest() -> u32 {
    EditorDefaults::default().superset_rest_secs
}

impl StrictExercise {
    pub fn is_rest(&self) -> bool {
        self.kind == ExerciseKind::Rest
    }
}

/// Position of a set within a workout.
///
/// Set ids are only unique inside their exercise, so completion is tracked
/// by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SetRef {
    pub exercise_index: usize,
    pub set_index: usize,
}

impl SetRef {
    pub fn new(exercise_index: usize, set_index: usize) -> Self {
        Self {
            exercise_index,
            set_index,
        }
    }

    /// Locate `set_id` inside the exercise with `exercise_id`.
    pub fn find(exercises: &[StrictExercise], exercise_id: &str, set_id: &str) -> Option<Self> {
        exercises.iter().enumerate().find_map(|(e, exercise)| {
            if exercise.id != exercise_id {
                return None;
            }
            exercise.sets.iter().position(|s| s.id == set_id).map(|s| Self::new(e, s))
        })
    }

    pub fn resolve<'a>(&self, exercises: &'a [StrictExercise]) -> Option<&'a StrictSet> {
        exercises.get(self.exercise_index)?.sets.get(self.set_index)
    }
}

/// A named list of strict exercises.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrictWorkout {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<StrictExercise>,
}

/// Build a weight/reps exercise from a library pick with the usual 12/10/8 sets.
pub fn make_exercise_from_library(
    entry: &LibraryExercise,
    ids: &SharedIds,
    defaults: &EditorDefaults,
) -> StrictExercise {
    let sets = [12, 10, 8]
        .into_iter()
        .map(|reps| StrictSet {
            id: ids.next_id("set"),
            reps: Some(Reps::Fixed(reps)),
            weight: Some(0.0),
            rest: defaults.strict_rest_secs,
            ..Default::default()
        })
        .collect();

    StrictExercise {
        id: ids.next_id("exercise"),
        name: entry.name.clone(),
        thumbnail: String::new(),
        category: entry.category.clone(),
        equipment: entry.equipment.clone(),
        kind: ExerciseKind::WeightReps,
        sets,
        superset_with_next: false,
        notes: String::new(),
        rest_duration: 0,
        rest_between_rounds: defaults.superset_rest_secs,
    }
}

/// Build a standalone rest exercise.
pub fn make_rest_exercise(duration: Option<u32>, ids: &SharedIds, defaults: &EditorDefaults) -> StrictExercise {
    StrictExercise {
        id: ids.next_id("rest"),
        name: "Rest".to_string(),
        thumbnail: String::new(),
        category: String::new(),
        equipment: String::new(),
        kind: ExerciseKind::Rest,
        sets: Vec::new(),
        superset_with_next: false,
        notes: String::new(),
        rest_duration: duration.unwrap_or(defaults.rest_exercise_secs),
        rest_between_rounds: defaults.superset_rest_secs,
    }
}

/// Copy an exercise with fresh ids for it and all of its sets.
pub fn clone_exercise(exercise: &StrictExercise, ids: &SharedIds) -> StrictExercise {
    StrictExercise {
        id: ids.next_id(if exercise.is_rest() { "rest" } else { "exercise" }),
        name: format!("{} (copy)", exercise.name),
        superset_with_next: false,
        sets: exercise
            .sets
            .iter()
            .map(|set| StrictSet {
                id: ids.next_id("set"),
                ..set.clone()
            })
            .collect(),
        ..exercise.clone()
    }
}

/// Clear every superset link that has nothing valid to point at.
///
/// A link is kept only when the exercise is not a rest and its successor
/// exists and is not a rest. Returns the number of links cleared.
pub fn normalize_superset_links(exercises: &mut [StrictExercise]) -> usize {
    let mut cleared = 0;
    let len = exercises.len();

    for i in 0..len {
        if !exercises[i].superset_with_next {
            continue;
        }
        let valid = !exercises[i].is_rest() && exercises.get(i + 1).is_some_and(|next| !next.is_rest());
        if !valid {
            exercises[i].superset_with_next = false;
            cleared += 1;
        }
    }

    cleared
}

/// Whether the exercise at `index` belongs to a superset (as head or member).
pub fn is_in_superset(exercises: &[StrictExercise], index: usize) -> bool {
    let Some(exercise) = exercises.get(index) else {
        return false;
    };
    exercise.superset_with_next || (index > 0 && exercises[index - 1].superset_with_next)
}

/// Editing handle over a strict workout.
pub struct StrictEditor {
    exercises: Vec<StrictExercise>,
    ids: SharedIds,
    defaults: EditorDefaults,
}

impl StrictEditor {
    /// Create an empty editor.
    pub fn new(ids: SharedIds, defaults: EditorDefaults) -> Self {
        Self {
            exercises: Vec::new(),
            ids,
            defaults,
        }
    }

    /// Wrap existing exercises, repairing any dangling superset links.
    pub fn from_exercises(mut exercises: Vec<StrictExercise>, ids: SharedIds, defaults: EditorDefaults) -> Self {
        let cleared = normalize_superset_links(&mut exercises);
        if cleared > 0 {
            tracing::warn!("Cleared {} dangling superset links on load", cleared);
        }
        Self {
            exercises,
            ids,
            defaults,
        }
    }

    pub fn exercises(&self) -> &[StrictExercise] {
        &self.exercises
    }

    pub fn into_exercises(self) -> Vec<StrictExercise> {
        self.exercises
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    fn check_index(&self, index: usize) -> Result<(), WorkoutError> {
        if index >= self.exercises.len() {
            return Err(WorkoutError::IndexOutOfRange {
                index,
                len: self.exercises.len(),
            });
        }
        Ok(())
    }

    fn position_of(&self, exercise_id: &str) -> Result<usize, WorkoutError> {
        self.exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or_else(|| WorkoutError::NotFound(exercise_id.to_string()))
    }

    /// Append a standalone rest exercise.
    pub fn add_rest(&mut self, duration: Option<u32>) -> String {
        let rest = make_rest_exercise(duration, &self.ids, &self.defaults);
        let id = rest.id.clone();
        self.exercises.push(rest);
        id
    }

    /// Remove the exercise at `index`.
    ///
    /// A predecessor linked to the removed exercise keeps its link only when
    /// the removed exercise itself linked onward, so the chain closes over
    /// the gap.
    pub fn remove(&mut self, index: usize) -> Result<StrictExercise, WorkoutError> {
        self.check_index(index)?;

        if index > 0 && self.exercises[index - 1].superset_with_next && !self.exercises[index].superset_with_next {
            self.exercises[index - 1].superset_with_next = false;
        }
        let removed = self.exercises.remove(index);
        normalize_superset_links(&mut self.exercises);

        tracing::debug!("Removed exercise {} at {}", removed.name, index);
        Ok(removed)
    }

    /// Insert a copy of the exercise right after it.
    pub fn duplicate(&mut self, index: usize) -> Result<String, WorkoutError> {
        self.check_index(index)?;

        let copy = clone_exercise(&self.exercises[index], &self.ids);
        let id = copy.id.clone();
        self.exercises.insert(index + 1, copy);
        normalize_superset_links(&mut self.exercises);
        Ok(id)
    }

    /// Move an exercise to a new position.
    ///
    /// The moved exercise leaves its superset and never joins the one it
    /// lands in: its own link, the link of whatever pointed at it, and the
    /// link of its new predecessor are cleared.
    pub fn move_exercise(&mut self, from: usize, to: usize) -> Result<(), WorkoutError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        if from > 0 && self.exercises[from - 1].superset_with_next {
            self.exercises[from - 1].superset_with_next = false;
        }
        let mut moved = self.exercises.remove(from);
        moved.superset_with_next = false;
        self.exercises.insert(to, moved);
        if to > 0 {
            self.exercises[to - 1].superset_with_next = false;
        }
        normalize_superset_links(&mut self.exercises);

        tracing::debug!("Moved exercise from {} to {}", from, to);
        Ok(())
    }

    /// Link or unlink the exercise with its successor.
    ///
    /// Returns the effective flag, which stays `false` when there is no
    /// valid successor to link to.
    pub fn set_superset_with_next(&mut self, index: usize, linked: bool) -> Result<bool, WorkoutError> {
        self.check_index(index)?;
        self.exercises[index].superset_with_next = linked;
        normalize_superset_links(&mut self.exercises);
        Ok(self.exercises[index].superset_with_next)
    }

    /// Change what an exercise measures; its sets are cleared.
    pub fn set_kind(&mut self, index: usize, kind: ExerciseKind) -> Result<(), WorkoutError> {
        self.check_index(index)?;
        let exercise = &mut self.exercises[index];
        exercise.kind = kind;
        exercise.sets.clear();
        if kind == ExerciseKind::Rest && exercise.rest_duration == 0 {
            exercise.rest_duration = self.defaults.rest_exercise_secs;
        }
        normalize_superset_links(&mut self.exercises);
        Ok(())
    }

    /// Edit exercise fields in place; links are re-normalized afterwards.
    pub fn update_exercise<F>(&mut self, exercise_id: &str, f: F) -> Result<(), WorkoutError>
    where
        F: FnOnce(&mut StrictExercise),
    {
        let index = self.position_of(exercise_id)?;
        f(&mut self.exercises[index]);
        normalize_superset_links(&mut self.exercises);
        Ok(())
    }

    /// Append an empty set to an exercise.
    pub fn add_set(&mut self, exercise_id: &str) -> Result<String, WorkoutError> {
        let index = self.position_of(exercise_id)?;
        let set = StrictSet {
            id: self.ids.next_id("set"),
            ..Default::default()
        };
        let id = set.id.clone();
        self.exercises[index].sets.push(set);
        Ok(id)
    }

    /// Remove a set from an exercise.
    pub fn remove_set(&mut self, exercise_id: &str, set_id: &str) -> Result<StrictSet, WorkoutError> {
        let index = self.position_of(exercise_id)?;
        let sets = &mut self.exercises[index].sets;
        let pos = sets
            .iter()
            .position(|s| s.id == set_id)
            .ok_or_else(|| WorkoutError::NotFound(set_id.to_string()))?;
        Ok(sets.remove(pos))
    }

    /// Insert a copy of a set right after it.
    pub fn duplicate_set(&mut self, exercise_id: &str, set_id: &str) -> Result<String, WorkoutError> {
        let index = self.position_of(exercise_id)?;
        let new_id = self.ids.next_id("set");
        let sets = &mut self.exercises[index].sets;
        let pos = sets
            .iter()
            .position(|s| s.id == set_id)
            .ok_or_else(|| WorkoutError::NotFound(set_id.to_string()))?;
        let copy = StrictSet {
            id: new_id.clone(),
            ..sets[pos].clone()
        };
        sets.insert(pos + 1, copy);
        Ok(new_id)
    }

    /// Edit one set in place.
    pub fn update_set<F>(&mut self, exercise_id: &str, set_id: &str, f: F) -> Result<(), WorkoutError>
    where
        F: FnOnce(&mut StrictSet),
    {
        let index = self.position_of(exercise_id)?;
        let set = self.exercises[index]
            .sets
            .iter_mut()
            .find(|s| s.id == set_id)
            .ok_or_else(|| WorkoutError::NotFound(set_id.to_string()))?;
        f(set);
        Ok(())
    }
}

impl Default for StrictEditor {
    fn default() -> Self {
        Self::new(default_ids(), EditorDefaults::default())
    }
}

impl AddFromLibrary for StrictEditor {
    fn add(&mut self, exercise: &LibraryExercise) -> String {
        let exercise = make_exercise_from_library(exercise, &self.ids, &self.defaults);
        let id = exercise.id.clone();
        tracing::debug!("Added strict exercise {}", exercise.name);
        self.exercises.push(exercise);
        id
    }
}
