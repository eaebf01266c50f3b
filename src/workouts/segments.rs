//! Positional grouping of workout entries.
//!
//! Supersets and autoplay blocks are both implied by adjacency. This module
//! does the one adjacency scan and hands every consumer an explicit list of
//! `Single` / `Group` segments.

use crate::workouts::autoplay::{AutoplayBlock, AutoplayItem, AutoplayWorkout};
use crate::workouts::strict::StrictExercise;

/// An entry tagged with its position in the source list.
pub type Indexed<'a, T> = (usize, &'a T);

/// A run of the source list.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a, T, M> {
    /// An entry outside of any group
    Single(Indexed<'a, T>),
    /// Consecutive entries forming one group
    Group { meta: M, members: Vec<Indexed<'a, T>> },
}

/// Split `items` into maximal runs where each neighbour pair `joins`, then
/// let `group_meta` decide whether a run is a group or a sequence of singles.
pub fn segment_by<'a, T, M, J, G>(items: &'a [T], joins: J, group_meta: G) -> Vec<Segment<'a, T, M>>
where
    J: Fn(&T, &T) -> bool,
    G: Fn(&[Indexed<'a, T>]) -> Option<M>,
{
    let mut segments = Vec::new();
    let mut run: Vec<Indexed<'a, T>> = Vec::new();

    let flush = |run: &mut Vec<Indexed<'a, T>>, segments: &mut Vec<Segment<'a, T, M>>| {
        if run.is_empty() {
            return;
        }
        match group_meta(run.as_slice()) {
            Some(meta) => segments.push(Segment::Group {
                meta,
                members: std::mem::take(run),
            }),
            None => segments.extend(run.drain(..).map(Segment::Single)),
        }
    };

    for (index, item) in items.iter().enumerate() {
        if let Some(&(_, prev)) = run.last() {
            if !joins(prev, item) {
                flush(&mut run, &mut segments);
            }
        }
        run.push((index, item));
    }
    flush(&mut run, &mut segments);

    segments
}

/// Metadata shared by the members of a superset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupersetMeta {
    /// Rest after each full round, taken from the first member
    pub rest_between_rounds: u32,
}

/// Group strict exercises into supersets.
///
/// Rest exercises never join a superset, and a lone flagged exercise with
/// nothing valid after it stays a single.
pub fn strict_segments(exercises: &[StrictExercise]) -> Vec<Segment<'_, StrictExercise, SupersetMeta>> {
    segment_by(
        exercises,
        |prev, next| prev.superset_with_next && !prev.is_rest() && !next.is_rest(),
        |run| {
            (run.len() >= 2).then(|| SupersetMeta {
                rest_between_rounds: run[0].1.rest_between_rounds,
            })
        },
    )
}

/// Group autoplay items into block instances.
///
/// Only a contiguous run sharing a block id that exists in `workout.blocks`
/// forms a group; the same block appearing twice yields two instances.
pub fn autoplay_segments(workout: &AutoplayWorkout) -> Vec<Segment<'_, AutoplayItem, &AutoplayBlock>> {
    let resolve = |item: &AutoplayItem| item.block_id.as_deref().and_then(|id| workout.block(id));

    segment_by(
        &workout.items,
        |prev, next| match (resolve(prev), resolve(next)) {
            (Some(a), Some(b)) => a.id == b.id,
            _ => false,
        },
        |run| resolve(run[0].1),
    )
}
