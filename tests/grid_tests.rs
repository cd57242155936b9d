use std::sync::Arc;
use timetable_builder::{Course, ScheduleGrid, Selection};

fn course(code: u32, slots: &[&str]) -> Arc<Course> {
    let mut course = Course::new(code, format!("科目{code}"), format!("Course {code}"));
    course.slots = slots.iter().map(|s| s.to_string()).collect();
    Arc::new(course)
}

#[test]
fn course_appears_in_every_declared_cell() {
    let a = course(1, &["0:0", "2:1"]);
    let grid = ScheduleGrid::build([&a]);

    assert_eq!(grid.cell(0, 0), [a.clone()]);
    assert_eq!(grid.cell(1, 2), [a.clone()]);
    assert_eq!(grid.placements(), 2);
}

#[test]
fn out_of_range_slots_are_dropped() {
    let a = course(1, &["7:0", "0:6", "6:5"]);
    let grid = ScheduleGrid::build([&a]);

    assert_eq!(grid.placements(), 1);
    assert_eq!(grid.cell(5, 6), [a.clone()]);
    assert!(grid.cell(0, 0).is_empty());
    assert!(grid.cell(6, 0).is_empty());
}

#[test]
fn malformed_slots_are_ignored() {
    let a = course(1, &["", "1", "1:2:3", "x:1", "1:1"]);
    let grid = ScheduleGrid::build([&a]);
    assert_eq!(grid.placements(), 1);
    assert_eq!(grid.cell(1, 1).len(), 1);
}

#[test]
fn cell_keeps_selection_order() {
    let mut selection = Selection::new();
    selection.add(course(2, &["3:3"]));
    selection.add(course(1, &["3:3"]));

    let grid = ScheduleGrid::build(selection.iter());
    let codes: Vec<u32> = grid.cell(3, 3).iter().map(|c| c.timetable_code).collect();
    assert_eq!(codes, vec![2, 1]);
}

#[test]
fn rebuild_is_idempotent() {
    let mut selection = Selection::new();
    selection.add(course(1, &["0:0", "4:4"]));
    selection.add(course(2, &["0:0"]));

    let first = ScheduleGrid::build(selection.iter());
    let second = ScheduleGrid::build(selection.iter());
    assert_eq!(first, second);
}

#[test]
fn empty_selection_gives_empty_grid() {
    let grid = ScheduleGrid::build(Selection::new().iter());
    assert!(grid.is_empty());
    assert_eq!(grid.rows().len(), 6);
    assert!(grid.rows().iter().all(|row| row.len() == 7));
}

#[test]
fn text_table_lists_titles_under_day_headers() {
    let a = course(1, &["1:0"]);
    let table = ScheduleGrid::build([&a]).to_text_table();
    assert!(table.contains("Monday"));
    assert!(table.contains("Others"));
    assert!(table.contains("科目1"));
    assert_eq!(table.lines().count(), 6 + 4);
}
