use crate::catalog::Catalog;
use crate::course::{Course, SlotCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Course fields the catalog can be browsed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Term,
    OpeningTerm,
    AcademicYear,
    Faculty,
    Category,
    Department,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Term,
        FilterField::OpeningTerm,
        FilterField::AcademicYear,
        FilterField::Faculty,
        FilterField::Category,
        FilterField::Department,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Term => "term",
            FilterField::OpeningTerm => "opening",
            FilterField::AcademicYear => "year",
            FilterField::Faculty => "faculty",
            FilterField::Category => "category",
            FilterField::Department => "department",
        }
    }

    /// Set-valued filters accept any number of allowed values.
    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            FilterField::Faculty | FilterField::Category | FilterField::Department
        )
    }

    pub fn values_of<'a>(&self, course: &'a Course) -> Vec<&'a str> {
        match self {
            FilterField::Term => vec![course.term.as_str()],
            FilterField::OpeningTerm => vec![course.opening_term.as_str()],
            FilterField::AcademicYear => course.years_offered.iter().map(String::as_str).collect(),
            FilterField::Faculty => vec![course.faculty.as_str()],
            FilterField::Category => vec![course.category.as_str()],
            FilterField::Department => vec![course.department.as_str()],
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "term" => Ok(FilterField::Term),
            "opening" | "opening_term" => Ok(FilterField::OpeningTerm),
            "year" | "academic_year" => Ok(FilterField::AcademicYear),
            "faculty" => Ok(FilterField::Faculty),
            "category" => Ok(FilterField::Category),
            "department" => Ok(FilterField::Department),
            other => Err(format!("unknown filter field '{other}'")),
        }
    }
}

/// The standing filters. Unset single values and empty sets mean
/// "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(rename = "courseTermFilter", default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(
        rename = "courseOpeningTermFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub opening_term: Option<String>,
    #[serde(
        rename = "courseAcademicYearFilter",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub academic_year: Option<String>,
    #[serde(rename = "facultyFilter", default)]
    pub faculties: Vec<String>,
    #[serde(rename = "categoryFilter", default)]
    pub categories: Vec<String>,
    #[serde(rename = "departmentFilter", default)]
    pub departments: Vec<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Term => self.term.as_deref(),
            FilterField::OpeningTerm => self.opening_term.as_deref(),
            FilterField::AcademicYear => self.academic_year.as_deref(),
            _ => None,
        }
    }

    pub fn set_values(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::Faculty => &self.faculties,
            FilterField::Category => &self.categories,
            FilterField::Department => &self.departments,
            _ => &[],
        }
    }

    fn set_values_mut(&mut self, field: FilterField) -> Option<&mut Vec<String>> {
        match field {
            FilterField::Faculty => Some(&mut self.faculties),
            FilterField::Category => Some(&mut self.categories),
            FilterField::Department => Some(&mut self.departments),
            _ => None,
        }
    }

    /// Replace a filter with a single value, or clear it with `None`. An
    /// empty string clears as well. For set-valued fields the set becomes
    /// exactly `[value]`.
    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match field {
            FilterField::Term => self.term = value,
            FilterField::OpeningTerm => self.opening_term = value,
            FilterField::AcademicYear => self.academic_year = value,
            _ => {
                if let Some(values) = self.set_values_mut(field) {
                    *values = value.into_iter().collect();
                }
            }
        }
    }

    /// Add an allowed value to a set-valued filter. Returns false when the
    /// field is single-valued or the value was already allowed.
    pub fn add_value(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.set_values_mut(field) {
            Some(values) if !values.contains(&value) => {
                values.push(value);
                true
            }
            _ => false,
        }
    }

    pub fn remove_value(&mut self, field: FilterField, value: &str) -> bool {
        match self.set_values_mut(field) {
            Some(values) => {
                let before = values.len();
                values.retain(|v| v != value);
                values.len() != before
            }
            None => false,
        }
    }

    /// Allow every value the catalog knows for `field`.
    pub fn select_all(&mut self, field: FilterField, catalog: &Catalog) {
        let all = catalog.unique_values(field);
        if let Some(values) = self.set_values_mut(field) {
            *values = all;
        }
    }

    pub fn clear(&mut self, field: FilterField) {
        self.set(field, None);
    }

    pub fn matches(&self, course: &Course) -> bool {
        matches(course, self)
    }

    pub fn summary(&self) -> String {
        let single = |v: &Option<String>| v.clone().unwrap_or_else(|| "(all)".to_string());
        let multi = |v: &[String]| {
            if v.is_empty() {
                "(all)".to_string()
            } else {
                v.join(", ")
            }
        };
        format!(
            "term       : {}\nopening    : {}\nyear       : {}\nfaculty    : {}\ncategory   : {}\ndepartment : {}",
            single(&self.term),
            single(&self.opening_term),
            single(&self.academic_year),
            multi(&self.faculties),
            multi(&self.categories),
            multi(&self.departments),
        )
    }
}

fn single_matches(filter: &Option<String>, value: &str) -> bool {
    filter.as_deref().is_none_or(|wanted| wanted == value)
}

fn set_matches(filter: &[String], value: &str) -> bool {
    filter.is_empty() || filter.iter().any(|allowed| allowed == value)
}

/// Conjunction of the standing filters. The time-slot test is not part of
/// this; see [`candidates`].
pub fn matches(course: &Course, filters: &FilterState) -> bool {
    single_matches(&filters.term, &course.term)
        && single_matches(&filters.opening_term, &course.opening_term)
        && filters
            .academic_year
            .as_deref()
            .is_none_or(|year| course.years_offered.iter().any(|y| y == year))
        && set_matches(&filters.faculties, &course.faculty)
        && set_matches(&filters.categories, &course.category)
        && set_matches(&filters.departments, &course.department)
}

/// Courses offered in `slot` that pass the standing filters, in catalog order.
pub fn candidates(catalog: &Catalog, filters: &FilterState, slot: SlotCode) -> Vec<Arc<Course>> {
    let code = slot.to_string();
    catalog
        .iter()
        .filter(|course| course.has_slot(&code) && matches(course, filters))
        .cloned()
        .collect()
}
