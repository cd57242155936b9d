use crate::course::{Course, TimetableCode};
use crate::filter::FilterField;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("catalog is not a valid course list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only course list, loaded once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Arc<Course>>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: courses.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_reader(reader)?;
        Ok(Self::new(courses))
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(json)?;
        Ok(Self::new(courses))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} courses from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn courses(&self) -> &[Arc<Course>] {
        &self.courses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Course>> {
        self.courses.iter()
    }

    pub fn find(&self, code: TimetableCode) -> Option<&Arc<Course>> {
        self.courses.iter().find(|course| course.timetable_code == code)
    }

    /// Distinct values of `field` in order of first appearance. List-valued
    /// fields contribute each of their elements.
    pub fn unique_values(&self, field: FilterField) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for course in &self.courses {
            for value in field.values_of(course) {
                if seen.insert(value) {
                    values.push(value.to_string());
                }
            }
        }
        values
    }
}
