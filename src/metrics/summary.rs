//! End-of-session summaries and pre-execution planning figures.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::metrics::zones::{IntensityZone, ZoneTime};
use crate::workouts::aerobic::AerobicWorkout;
use crate::workouts::autoplay::AutoplayWorkout;
use crate::workouts::duration::format_elapsed;
use crate::workouts::flatten::flatten_autoplay;
use crate::workouts::segments::{strict_segments, Segment};
use crate::workouts::strict::{SetRef, StrictExercise, StrictSet};

/// Completion in percent, 0 when there is nothing to complete and never above 100.
pub fn progress_percent(done: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (done as f32 / total as f32 * 100.0).min(100.0)
}

/// Volume as `480kg`, or in tonnes from 1000 kg (`1.2t`).
pub fn format_volume(volume_kg: f64) -> String {
    if volume_kg >= 1000.0 {
        format!("{:.1}t", volume_kg / 1000.0)
    } else {
        format!("{}kg", (volume_kg * 10.0).round() / 10.0)
    }
}

/// Σ `weight × reps` over the completed sets.
pub fn strict_volume(exercises: &[StrictExercise], completed: &BTreeSet<SetRef>) -> f64 {
    completed
        .iter()
        .filter_map(|set| set.resolve(exercises))
        .map(StrictSet::volume)
        .sum()
}

/// Time in one zone relative to the busiest zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneShare {
    pub zone: IntensityZone,
    pub seconds: u32,
    /// 0.0 - 1.0, the busiest zone is 1.0
    pub share: f32,
}

/// Non-zero zones in zone order with their bar share.
pub fn zone_shares(zone_time: &ZoneTime) -> Vec<ZoneShare> {
    let max = zone_time.max().max(1) as f32;
    zone_time
        .used()
        .map(|(zone, seconds)| ZoneShare {
            zone,
            seconds,
            share: seconds as f32 / max,
        })
        .collect()
}

/// Summary of a finished aerobic session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AerobicSummary {
    pub elapsed_seconds: u32,
    pub elapsed_display: String,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub zones: Vec<ZoneShare>,
    pub blocks_completed: usize,
    pub total_blocks: usize,
}

impl AerobicSummary {
    pub fn new(
        elapsed_seconds: u32,
        completed_steps: usize,
        total_steps: usize,
        zone_time: &ZoneTime,
        blocks_completed: usize,
        total_blocks: usize,
    ) -> Self {
        Self {
            elapsed_seconds,
            elapsed_display: format_elapsed(elapsed_seconds),
            completed_steps,
            total_steps,
            zones: zone_shares(zone_time),
            blocks_completed,
            total_blocks,
        }
    }

    pub fn zone_seconds(&self, zone: IntensityZone) -> u32 {
        self.zones.iter().find(|z| z.zone == zone).map(|z| z.seconds).unwrap_or(0)
    }
}

/// Summary of a finished autoplay session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoplaySummary {
    pub elapsed_seconds: u32,
    pub elapsed_display: String,
    pub completed_items: usize,
    pub total_items: usize,
    pub work_seconds: u32,
    pub rest_seconds: u32,
}

impl AutoplaySummary {
    pub fn new(
        elapsed_seconds: u32,
        completed_items: usize,
        total_items: usize,
        work_seconds: u32,
        rest_seconds: u32,
    ) -> Self {
        Self {
            elapsed_seconds,
            elapsed_display: format_elapsed(elapsed_seconds),
            completed_items,
            total_items,
            work_seconds,
            rest_seconds,
        }
    }
}

/// Summary of a finished strict session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrictSummary {
    pub elapsed_seconds: u32,
    pub elapsed_display: String,
    /// Rest steps are excluded from both counts
    pub completed_sets: usize,
    pub total_sets: usize,
    pub volume_kg: f64,
    pub volume_display: String,
}

impl StrictSummary {
    pub fn new(elapsed_seconds: u32, completed_sets: usize, total_sets: usize, volume_kg: f64) -> Self {
        Self {
            elapsed_seconds,
            elapsed_display: format_elapsed(elapsed_seconds),
            completed_sets,
            total_sets,
            volume_kg,
            volume_display: format_volume(volume_kg),
        }
    }
}

/// Planned figures of an aerobic workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AerobicPlan {
    pub block_count: usize,
    /// Declared steps, repetitions not expanded
    pub step_count: usize,
    /// Time steps only, repetitions included
    pub planned_seconds: u32,
    pub zone_seconds: ZoneTime,
}

impl AerobicPlan {
    pub fn from_workout(workout: &AerobicWorkout) -> Self {
        let mut zone_seconds = ZoneTime::new();
        for block in &workout.blocks {
            for step in &block.steps {
                zone_seconds.add(step.intensity, step.duration_seconds().saturating_mul(block.repetitions));
            }
        }

        Self {
            block_count: workout.blocks.len(),
            step_count: workout.blocks.iter().map(|b| b.steps.len()).sum(),
            planned_seconds: workout.blocks.iter().map(|b| b.total_seconds()).sum(),
            zone_seconds,
        }
    }
}

/// Planned figures of an autoplay workout, rounds and repeats expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoplayPlan {
    pub item_count: usize,
    pub exercise_count: usize,
    pub work_seconds: u32,
    pub rest_seconds: u32,
}

impl AutoplayPlan {
    pub fn from_workout(workout: &AutoplayWorkout) -> Self {
        let flat = flatten_autoplay(workout);
        let (work, rest): (Vec<_>, Vec<_>) = flat.iter().partition(|f| f.is_exercise());

        Self {
            item_count: flat.len(),
            exercise_count: work.len(),
            work_seconds: work.iter().map(|f| f.duration()).sum(),
            rest_seconds: rest.iter().map(|f| f.duration()).sum(),
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.work_seconds + self.rest_seconds
    }
}

/// Planned figures of a strict workout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrictPlan {
    /// Rest exercises excluded
    pub exercise_count: usize,
    pub set_count: usize,
    pub superset_count: usize,
    pub planned_volume_kg: f64,
}

impl StrictPlan {
    pub fn from_exercises(exercises: &[StrictExercise]) -> Self {
        let working = || exercises.iter().filter(|e| !e.is_rest());

        Self {
            exercise_count: working().count(),
            set_count: working().map(|e| e.sets.len()).sum(),
            superset_count: strict_segments(exercises)
                .iter()
                .filter(|s| matches!(s, Segment::Group { .. }))
                .count(),
            planned_volume_kg: working().flat_map(|e| e.sets.iter()).map(|s| s.volume()).sum(),
        }
    }

    pub fn volume_display(&self) -> String {
        format_volume(self.planned_volume_kg)
    }
}
