use std::sync::Arc;
use timetable_builder::{Catalog, Course, Selection, ToggleOutcome};

fn course(code: u32) -> Arc<Course> {
    Arc::new(Course::new(code, format!("科目{code}"), format!("Course {code}")))
}

fn selection_of(codes: &[u32]) -> Selection {
    let mut selection = Selection::new();
    for &code in codes {
        selection.add(course(code));
    }
    selection
}

#[test]
fn add_ignores_duplicate_codes() {
    let mut selection = selection_of(&[1, 2]);
    assert!(!selection.add(course(1)));
    assert_eq!(selection.codes(), vec![1, 2]);
}

#[test]
fn remove_drops_matching_entries() {
    let mut selection = selection_of(&[1, 2, 3]);
    assert!(selection.remove(2));
    assert!(!selection.remove(2));
    assert_eq!(selection.codes(), vec![1, 3]);
}

#[test]
fn toggle_twice_restores_absent_course() {
    let original = selection_of(&[1, 2]);
    let mut selection = original.clone();
    assert_eq!(selection.toggle(course(9)), ToggleOutcome::Added);
    assert_eq!(selection.codes(), vec![1, 2, 9]);
    assert_eq!(selection.toggle(course(9)), ToggleOutcome::Removed);
    assert_eq!(selection, original);
}

#[test]
fn toggle_twice_restores_position_of_present_course() {
    let original = selection_of(&[1, 2, 3]);
    let mut selection = original.clone();
    assert_eq!(selection.toggle(course(2)), ToggleOutcome::Removed);
    assert_eq!(selection.codes(), vec![1, 3]);
    assert_eq!(selection.toggle(course(2)), ToggleOutcome::Added);
    assert_eq!(selection.codes(), vec![1, 2, 3]);
    assert_eq!(selection, original);
}

#[test]
fn toggle_appends_after_unrelated_changes() {
    let mut selection = selection_of(&[1, 2, 3]);
    selection.toggle(course(1));
    selection.add(course(4));
    selection.toggle(course(1));
    assert_eq!(selection.codes(), vec![2, 3, 4, 1]);
}

#[test]
fn from_codes_skips_unknown_and_repeated_codes() {
    let catalog = Catalog::new(vec![
        Course::new(10, "a", "A"),
        Course::new(20, "b", "B"),
    ]);
    let selection = Selection::from_codes(&catalog, &[20, 999, 10, 20]);
    assert_eq!(selection.codes(), vec![20, 10]);
}
