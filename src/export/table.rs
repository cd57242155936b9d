use super::ExportError;
use crate::course::Course;
use serde::Serialize;
use std::sync::Arc;

pub const TABLE_HEADERS: [&str; 6] = [
    "course_schedule_day_and_period",
    "course_schedule_timetable_code",
    "course_title_ja",
    "course_title_en",
    "code",
    "lecturer_name",
];

#[derive(Serialize)]
struct CourseRow<'a> {
    slots: String,
    timetable_code: u32,
    title_ja: &'a str,
    title_en: &'a str,
    code: &'a str,
    lecturer_name: &'a str,
}

impl<'a> From<&'a Course> for CourseRow<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            slots: course.slots.join(","),
            timetable_code: course.timetable_code,
            title_ja: &course.title_ja,
            title_en: &course.title_en,
            code: &course.code,
            lecturer_name: &course.lecturer_name,
        }
    }
}

/// Header row plus one row per course, separated by `delimiter`. Fields that
/// contain the delimiter are quoted.
pub fn delimited_table(courses: &[Arc<Course>], delimiter: u8) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(TABLE_HEADERS)?;
    for course in courses {
        writer.serialize(CourseRow::from(course.as_ref()))?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn tsv(courses: &[Arc<Course>]) -> Result<String, ExportError> {
    delimited_table(courses, b'\t')
}

pub fn csv(courses: &[Arc<Course>]) -> Result<String, ExportError> {
    delimited_table(courses, b',')
}
