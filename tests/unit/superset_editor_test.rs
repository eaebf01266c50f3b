//! Unit tests for superset link repair in the strict editor.

use std::sync::Arc;

use repflow::storage::config::EditorDefaults;
use repflow::workouts::ids::SequentialIds;
use repflow::workouts::strict::{is_in_superset, StrictEditor, StrictExercise};
use repflow::workouts::types::{AddFromLibrary, LibraryExercise};

fn editor_with(names: &[&str]) -> StrictEditor {
    let mut editor = StrictEditor::new(Arc::new(SequentialIds::new()), EditorDefaults::default());
    for name in names {
        editor.add(&LibraryExercise::new(*name, "Strength", "Barbell"));
    }
    editor
}

fn links(editor: &StrictEditor) -> Vec<bool> {
    editor.exercises().iter().map(|e| e.superset_with_next).collect()
}

fn assert_links_valid(exercises: &[StrictExercise]) {
    if let Some(last) = exercises.last() {
        assert!(!last.superset_with_next, "last exercise still linked");
    }
    for pair in exercises.windows(2) {
        if pair[0].superset_with_next {
            assert!(!pair[0].is_rest() && !pair[1].is_rest(), "link touches a rest");
        }
    }
}

#[test]
fn test_removing_chain_member_closes_gap() {
    let mut editor = editor_with(&["A", "B", "C"]);
    editor.set_superset_with_next(0, true).unwrap();
    editor.set_superset_with_next(1, true).unwrap();

    let removed = editor.remove(1).unwrap();
    assert_eq!(removed.name, "B");
    // B linked onward, so A now chains to C.
    assert_eq!(links(&editor), vec![true, false]);
    assert_links_valid(editor.exercises());
}

#[test]
fn test_removing_chain_tail_unlinks_predecessor() {
    let mut editor = editor_with(&["A", "B", "C"]);
    editor.set_superset_with_next(0, true).unwrap();

    editor.remove(1).unwrap();
    assert_eq!(links(&editor), vec![false, false]);
}

#[test]
fn test_removing_last_clears_dangling_link() {
    let mut editor = editor_with(&["A", "B"]);
    editor.set_superset_with_next(0, true).unwrap();

    editor.remove(1).unwrap();
    assert_eq!(links(&editor), vec![false]);
}

#[test]
fn test_last_exercise_can_never_link() {
    let mut editor = editor_with(&["A", "B"]);
    assert!(!editor.set_superset_with_next(1, true).unwrap());
    assert_links_valid(editor.exercises());
}

#[test]
fn test_link_into_rest_is_refused() {
    let mut editor = editor_with(&["A"]);
    editor.add_rest(None);

    assert!(!editor.set_superset_with_next(0, true).unwrap());
    assert_eq!(editor.exercises()[1].rest_duration, 60);
}

#[test]
fn test_moving_detaches_from_superset() {
    let mut editor = editor_with(&["A", "B", "C"]);
    editor.set_superset_with_next(0, true).unwrap();
    editor.set_superset_with_next(1, true).unwrap();

    editor.move_exercise(1, 2).unwrap();
    let names: Vec<_> = editor.exercises().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "B"]);
    assert_eq!(links(&editor), vec![false, false, false]);
}

#[test]
fn test_moving_into_superset_does_not_join_it() {
    let mut editor = editor_with(&["A", "B", "C", "D"]);
    editor.set_superset_with_next(1, true).unwrap();

    editor.move_exercise(3, 2).unwrap();
    let names: Vec<_> = editor.exercises().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "D", "C"]);
    assert_eq!(links(&editor), vec![false, false, false, false]);
    assert!(!is_in_superset(editor.exercises(), 2));
    assert_links_valid(editor.exercises());
}

#[test]
fn test_moving_keeps_unrelated_superset() {
    let mut editor = editor_with(&["A", "B", "C", "D"]);
    editor.set_superset_with_next(0, true).unwrap();

    editor.move_exercise(3, 2).unwrap();
    let names: Vec<_> = editor.exercises().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "D", "C"]);
    assert_eq!(links(&editor), vec![true, false, false, false]);
}

#[test]
fn test_library_exercise_defaults() {
    let editor = editor_with(&["Squat"]);
    let squat = &editor.exercises()[0];

    assert_eq!(squat.sets.len(), 3);
    assert!(squat.sets.iter().all(|s| s.rest == 60));
    assert_eq!(editor.total_sets(), 3);
}
