//! Expansion of nested workouts into linear play order.
//!
//! All three flatteners are pure: the same workout always yields the same
//! sequence, so stepping backward and forward lands on identical steps.

use serde::Serialize;

use crate::workouts::aerobic::{AerobicWorkout, BlockStep};
use crate::workouts::autoplay::{AutoplayItem, AutoplayWorkout};
use crate::workouts::segments::{autoplay_segments, strict_segments, Segment};
use crate::workouts::strict::{SetRef, StrictExercise};

/// One aerobic step at a concrete block repetition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutableStep {
    pub block_index: usize,
    pub block_name: String,
    /// 1-based
    pub block_repetition: u32,
    pub total_block_repetitions: u32,
    pub step_index: usize,
    pub step: BlockStep,
    pub global_index: usize,
}

/// One play of an autoplay item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatItem {
    /// Item copy; its id is suffixed with round and repeat numbers
    pub item: AutoplayItem,
    /// 1-based round, `None` for loose items
    pub block_round: Option<u32>,
    pub block_total_rounds: Option<u32>,
    pub block_name: Option<String>,
}

impl FlatItem {
    pub fn is_exercise(&self) -> bool {
        self.item.is_exercise()
    }

    pub fn duration(&self) -> u32 {
        self.item.duration
    }
}

/// One strict focus step: a set to perform, or a standalone rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusStep {
    pub exercise_index: usize,
    /// `None` for rest steps
    pub set_index: Option<usize>,
    pub set_id: Option<String>,
    /// Rest sub-phase after completing this set, in seconds
    pub rest_after: u32,
    pub is_rest_step: bool,
    /// Countdown length of a rest step
    pub duration: u32,
}

impl FocusStep {
    fn set(exercise_index: usize, set_index: usize, set_id: &str, rest_after: u32) -> Self {
        Self {
            exercise_index,
            set_index: Some(set_index),
            set_id: Some(set_id.to_string()),
            rest_after,
            is_rest_step: false,
            duration: 0,
        }
    }

    /// Position of the set to perform, `None` on rest steps.
    pub fn set_ref(&self) -> Option<SetRef> {
        self.set_index.map(|set_index| SetRef::new(self.exercise_index, set_index))
    }

    fn rest(exercise_index: usize, duration: u32) -> Self {
        Self {
            exercise_index,
            set_index: None,
            set_id: None,
            rest_after: 0,
            is_rest_step: true,
            duration,
        }
    }
}

/// Block order, then repetition, then step order.
pub fn flatten_aerobic(workout: &AerobicWorkout) -> Vec<ExecutableStep> {
    let mut steps = Vec::new();

    for (block_index, block) in workout.blocks.iter().enumerate() {
        for repetition in 1..=block.repetitions {
            for (step_index, step) in block.steps.iter().enumerate() {
                let global_index = steps.len();
                steps.push(ExecutableStep {
                    block_index,
                    block_name: block.name.clone(),
                    block_repetition: repetition,
                    total_block_repetitions: block.repetitions,
                    step_index,
                    step: step.clone(),
                    global_index,
                });
            }
        }
    }

    steps
}

/// Block instances play round × item × repeat; loose items play their repeats once.
pub fn flatten_autoplay(workout: &AutoplayWorkout) -> Vec<FlatItem> {
    let mut flat = Vec::new();

    for segment in autoplay_segments(workout) {
        match segment {
            Segment::Group { meta: block, members } => {
                for round in 1..=block.rounds {
                    for (_, item) in &members {
                        for rep in 0..item.plays() {
                            flat.push(FlatItem {
                                item: AutoplayItem {
                                    id: format!("{}-r{}-rep{}", item.id, round, rep),
                                    ..(*item).clone()
                                },
                                block_round: Some(round),
                                block_total_rounds: Some(block.rounds),
                                block_name: Some(block.name.clone()),
                            });
                        }
                    }
                }
            }
            Segment::Single((_, item)) => {
                let plays = item.plays();
                for rep in 0..plays {
                    let id = if plays > 1 {
                        format!("{}-rep{}", item.id, rep)
                    } else {
                        item.id.clone()
                    };
                    flat.push(FlatItem {
                        item: AutoplayItem { id, ..item.clone() },
                        block_round: None,
                        block_total_rounds: None,
                        block_name: None,
                    });
                }
            }
        }
    }

    flat
}

/// Sets in order, supersets interleaved round-robin, rest exercises as rest steps.
///
/// Rest after a step: inside a superset the last member of a round rests
/// for the group's `rest_between_rounds` and the others for their own set
/// rest; outside a superset every set rests for its own value. The final
/// step of a superset or exercise always carries 0, any trailing rest comes
/// from a following rest exercise.
pub fn flatten_strict(exercises: &[StrictExercise]) -> Vec<FocusStep> {
    let mut steps = Vec::new();

    for segment in strict_segments(exercises) {
        match segment {
            Segment::Single((index, exercise)) if exercise.is_rest() => {
                steps.push(FocusStep::rest(index, exercise.rest_duration));
            }
            Segment::Single((index, exercise)) => {
                let last = exercise.sets.len().saturating_sub(1);
                for (set_index, set) in exercise.sets.iter().enumerate() {
                    let rest_after = if set_index == last { 0 } else { set.rest };
                    steps.push(FocusStep::set(index, set_index, &set.id, rest_after));
                }
            }
            Segment::Group { meta, members } => {
                let rounds = members.iter().map(|(_, e)| e.sets.len()).max().unwrap_or(0);
                for round in 0..rounds {
                    let active: Vec<_> = members.iter().filter(|(_, e)| round < e.sets.len()).collect();
                    let has_next_round = round + 1 < rounds;

                    for (position, (index, exercise)) in active.iter().enumerate() {
                        let set = &exercise.sets[round];
                        let last_in_round = position + 1 == active.len();
                        let rest_after = match (last_in_round, has_next_round) {
                            (true, true) => meta.rest_between_rounds,
                            (true, false) => 0,
                            (false, _) => set.rest,
                        };
                        steps.push(FocusStep::set(*index, round, &set.id, rest_after));
                    }
                }
            }
        }
    }

    steps
}
