use crate::catalog::Catalog;
use crate::course::{Course, TimetableCode};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Courses the user picked, in insertion order, unique by timetable code.
///
/// A toggle that removes a course remembers where it sat, so toggling the
/// same course straight back puts it in its old position.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    courses: Vec<Arc<Course>>,
    last_removed: Option<(TimetableCode, usize)>,
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.courses == other.courses
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve persisted codes against the catalog. Codes with no catalog
    /// entry are dropped, as are repeats.
    pub fn from_codes(catalog: &Catalog, codes: &[TimetableCode]) -> Self {
        let mut selection = Self::new();
        for &code in codes {
            match catalog.find(code) {
                Some(course) => {
                    selection.add(Arc::clone(course));
                }
                None => log::debug!("ignoring stored course {code}: not in catalog"),
            }
        }
        selection
    }

    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Course>> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn contains(&self, code: TimetableCode) -> bool {
        self.courses.iter().any(|c| c.timetable_code == code)
    }

    pub fn codes(&self) -> Vec<TimetableCode> {
        self.courses.iter().map(|c| c.timetable_code).collect()
    }

    /// Append unless a course with the same timetable code is present.
    pub fn add(&mut self, course: Arc<Course>) -> bool {
        if self.contains(course.timetable_code) {
            return false;
        }
        self.last_removed = None;
        self.courses.push(course);
        true
    }

    /// Remove every entry with `code`. Returns whether anything was removed.
    pub fn remove(&mut self, code: TimetableCode) -> bool {
        self.last_removed = None;
        let before = self.courses.len();
        self.courses.retain(|c| c.timetable_code != code);
        self.courses.len() != before
    }

    pub fn toggle(&mut self, course: Arc<Course>) -> ToggleOutcome {
        let code = course.timetable_code;
        if let Some(index) = self.courses.iter().position(|c| c.timetable_code == code) {
            self.remove(code);
            self.last_removed = Some((code, index));
            return ToggleOutcome::Removed;
        }
        match self.last_removed.take() {
            Some((removed, index)) if removed == code && index <= self.courses.len() => {
                self.courses.insert(index, course);
            }
            _ => self.courses.push(course),
        }
        ToggleOutcome::Added
    }
}
