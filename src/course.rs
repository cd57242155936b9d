use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique key of one scheduled offering in the catalog.
pub type TimetableCode = u32;

/// One course offering as it appears in the bundled catalog.
///
/// Field names on the wire follow the catalog export; everything except the
/// timetable code is optional so partially filled records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "course_title_ja", default)]
    pub title_ja: String,
    #[serde(rename = "course_title_en", default)]
    pub title_en: String,
    #[serde(rename = "course_schedule_term", default)]
    pub term: String,
    #[serde(rename = "course_schedule_opening_term", default)]
    pub opening_term: String,
    #[serde(rename = "course_schedule_day_and_period", default)]
    pub slots: Vec<String>,
    #[serde(rename = "course_schedule_timetable_code")]
    pub timetable_code: TimetableCode,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub faculty: String,
    #[serde(rename = "offering_year_offered", default)]
    pub years_offered: Vec<String>,
    #[serde(rename = "offering_teaching_method", default)]
    pub teaching_method: String,
    #[serde(rename = "offering_credits", default)]
    pub credits: f64,
    #[serde(rename = "offering_category", default)]
    pub category: String,
    #[serde(rename = "offering_department", default)]
    pub department: String,
    #[serde(rename = "offering_course_website", default)]
    pub website: String,
    #[serde(default)]
    pub lecturer_name: String,
    #[serde(default)]
    pub lecturer_email: String,
    #[serde(default)]
    pub lecturer_office_hours: String,
    #[serde(default)]
    pub lecturer_office_location: String,
}

impl Course {
    pub fn new(
        timetable_code: TimetableCode,
        title_ja: impl Into<String>,
        title_en: impl Into<String>,
    ) -> Self {
        Self {
            title_ja: title_ja.into(),
            title_en: title_en.into(),
            term: String::new(),
            opening_term: String::new(),
            slots: Vec::new(),
            timetable_code,
            code: String::new(),
            faculty: String::new(),
            years_offered: Vec::new(),
            teaching_method: String::new(),
            credits: 0.0,
            category: String::new(),
            department: String::new(),
            website: String::new(),
            lecturer_name: String::new(),
            lecturer_email: String::new(),
            lecturer_office_hours: String::new(),
            lecturer_office_location: String::new(),
        }
    }

    pub fn has_slot(&self, code: &str) -> bool {
        self.slots.iter().any(|slot| slot == code)
    }

    /// Slot codes that parse, in declaration order. Malformed codes are skipped.
    pub fn parsed_slots(&self) -> impl Iterator<Item = SlotCode> + '_ {
        self.slots.iter().filter_map(|raw| match raw.parse::<SlotCode>() {
            Ok(slot) => Some(slot),
            Err(err) => {
                log::debug!(
                    "course {} has unusable slot code '{}': {}",
                    self.timetable_code,
                    raw,
                    err
                );
                None
            }
        })
    }

    pub fn first_slot(&self) -> Option<SlotCode> {
        self.slots.first().and_then(|raw| raw.parse().ok())
    }

    /// Multi-line detail card shown when a course is inspected.
    pub fn detail_card(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} ({})\n", self.title_ja, self.title_en));
        out.push_str(&format!("Timetable code  : {}\n", self.timetable_code));
        out.push_str(&format!("Course code     : {}\n", self.code));
        out.push_str(&format!("Credits         : {}\n", self.credits));
        out.push_str(&format!("Lecturer        : {}\n", self.lecturer_name));
        if !self.lecturer_email.is_empty() {
            out.push_str(&format!("Email           : {}\n", self.lecturer_email));
        }
        if !self.lecturer_office_hours.is_empty() {
            out.push_str(&format!("Office hours    : {}\n", self.lecturer_office_hours));
        }
        if !self.lecturer_office_location.is_empty() {
            out.push_str(&format!("Office location : {}\n", self.lecturer_office_location));
        }
        out.push_str(&format!("Faculty         : {}\n", self.faculty));
        out.push_str(&format!("Department      : {}\n", self.department));
        out.push_str(&format!("Term            : {} / {}\n", self.term, self.opening_term));
        out.push_str(&format!("Day and time    : {}\n", self.slots.join(", ")));
        out.push_str(&format!("Year offered    : {}\n", self.years_offered.join(", ")));
        out.push_str(&format!("Teaching method : {}\n", self.teaching_method));
        out.push_str(&format!("Category        : {}\n", self.category));
        out.push_str(&format!("Course website  : {}\n", self.website));
        out
    }
}

/// A `"day:period"` pair. Values are not bounded here; the grid and the
/// calendar export decide which ones they can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotCode {
    pub day: usize,
    pub period: usize,
}

impl SlotCode {
    pub fn new(day: usize, period: usize) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.day, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotParseError(String);

impl fmt::Display for SlotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected 'day:period', got '{}'", self.0)
    }
}

impl std::error::Error for SlotParseError {}

impl FromStr for SlotCode {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(day), Some(period), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SlotParseError(s.to_string()));
        };
        let day = day
            .trim()
            .parse()
            .map_err(|_| SlotParseError(s.to_string()))?;
        let period = period
            .trim()
            .parse()
            .map_err(|_| SlotParseError(s.to_string()))?;
        Ok(Self { day, period })
    }
}
