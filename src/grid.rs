use crate::course::Course;
use std::sync::Arc;

pub const PERIODS: usize = 6;
pub const DAYS: usize = 7;

pub const DAY_LABELS: [&str; DAYS] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Others",
];

/// Weekly placement of the selected courses, indexed `[period][day]`.
///
/// Always rebuilt from the whole selection; never patched in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleGrid {
    cells: [[Vec<Arc<Course>>; DAYS]; PERIODS],
}

impl ScheduleGrid {
    pub fn build<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<Course>>,
    {
        let mut grid = Self::default();
        for course in courses {
            for slot in course.parsed_slots() {
                if slot.period < PERIODS && slot.day < DAYS {
                    grid.cells[slot.period][slot.day].push(Arc::clone(course));
                } else {
                    log::debug!(
                        "dropping slot {} of course {}: outside the weekly grid",
                        slot,
                        course.timetable_code
                    );
                }
            }
        }
        grid
    }

    /// Courses in the cell, or an empty slice for out-of-range indices.
    pub fn cell(&self, period: usize, day: usize) -> &[Arc<Course>] {
        self.cells
            .get(period)
            .and_then(|row| row.get(day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rows(&self) -> &[[Vec<Arc<Course>>; DAYS]; PERIODS] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Vec::is_empty)
    }

    pub fn placements(&self) -> usize {
        self.cells.iter().flatten().map(Vec::len).sum()
    }

    /// Boxed text table, one row per period, native titles per cell.
    pub fn to_text_table(&self) -> String {
        let mut header = vec![String::new()];
        header.extend(DAY_LABELS.iter().map(|d| d.to_string()));

        let rows: Vec<Vec<String>> = self
            .cells
            .iter()
            .enumerate()
            .map(|(period, row)| {
                let mut line = vec![(period + 1).to_string()];
                line.extend(row.iter().map(|courses| {
                    courses
                        .iter()
                        .map(|c| c.title_ja.as_str())
                        .collect::<Vec<_>>()
                        .join(" / ")
                }));
                line
            })
            .collect();

        let width = |s: &str| s.chars().count();
        let mut widths: Vec<usize> = header.iter().map(|h| width(h.as_str())).collect();
        for row in &rows {
            for (ci, cell) in row.iter().enumerate() {
                widths[ci] = widths[ci].max(width(cell.as_str()));
            }
        }

        let mut sep = String::from("+");
        for w in &widths {
            sep.push_str(&"-".repeat(*w + 2));
            sep.push('+');
        }

        let render_row = |cells: &[String]| {
            let mut line = String::from("|");
            for (ci, cell) in cells.iter().enumerate() {
                line.push(' ');
                line.push_str(cell);
                line.push_str(&" ".repeat(widths[ci].saturating_sub(width(cell.as_str()))));
                line.push_str(" |");
            }
            line
        };

        let mut out = String::new();
        out.push_str(&sep);
        out.push('\n');
        out.push_str(&render_row(&header));
        out.push('\n');
        out.push_str(&sep);
        out.push('\n');
        for row in &rows {
            out.push_str(&render_row(row));
            out.push('\n');
        }
        out.push_str(&sep);
        out.push('\n');
        out
    }
}
