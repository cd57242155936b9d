//! Artifacts produced from the current selection.

use crate::config::{ConfigError, TimetableConfig, academic_year};
use crate::course::Course;
use chrono::DateTime;
use chrono_tz::Tz;
use std::fmt;
use std::io;
use std::str::FromStr;
use std::string::FromUtf8Error;
use std::sync::Arc;

pub mod bookmarks;
pub mod ical;
pub mod path;
pub mod shell;
pub mod table;

pub use path::{CoursePath, derive_path, sanitize_title};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    ShellScript,
    ICalendar,
    Bookmarks,
    Tsv,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::ShellScript,
        ExportFormat::ICalendar,
        ExportFormat::Bookmarks,
        ExportFormat::Tsv,
        ExportFormat::Csv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::ShellScript => "sh",
            ExportFormat::ICalendar => "ics",
            ExportFormat::Bookmarks => "bookmarks",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Csv => "csv",
        }
    }

    /// Formats that are offered as a downloadable file besides the clipboard.
    pub fn is_downloadable(&self) -> bool {
        matches!(self, ExportFormat::ICalendar | ExportFormat::Bookmarks)
    }

    fn file_stem_and_extension(&self) -> (&'static str, &'static str) {
        match self {
            ExportFormat::ShellScript => ("timetable", "sh"),
            ExportFormat::ICalendar => ("timetable", "ics"),
            ExportFormat::Bookmarks => ("bookmarks", "html"),
            ExportFormat::Tsv => ("timetable", "tsv"),
            ExportFormat::Csv => ("timetable", "csv"),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sh" | "shell" => Ok(ExportFormat::ShellScript),
            "ics" | "ical" | "icalendar" => Ok(ExportFormat::ICalendar),
            "bookmarks" | "html" => Ok(ExportFormat::Bookmarks),
            "tsv" => Ok(ExportFormat::Tsv),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Settings and clock reading shared by one export run.
#[derive(Debug, Clone)]
pub struct ExportContext<'a> {
    pub config: &'a TimetableConfig,
    pub now: DateTime<Tz>,
}

impl<'a> ExportContext<'a> {
    /// Context stamped with the current time in the configured zone.
    pub fn new(config: &'a TimetableConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            now: config.now()?,
        })
    }

    pub fn at(config: &'a TimetableConfig, now: DateTime<Tz>) -> Self {
        Self { config, now }
    }

    pub fn academic_year(&self) -> i32 {
        academic_year(&self.now)
    }

    pub fn tz_name(&self) -> &'static str {
        self.now.timezone().name()
    }

    /// `YYYY-MM-DDTHHMMSS`, an ISO timestamp without colons.
    pub fn timestamp(&self) -> String {
        self.now.format("%Y-%m-%dT%H%M%S").to_string()
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        let (stem, extension) = format.file_stem_and_extension();
        format!("{}-{}.{}", stem, self.timestamp(), extension)
    }
}

/// Result of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub format: ExportFormat,
    pub content: String,
    /// Suggested download name for formats offered as a file.
    pub file_name: Option<String>,
}

pub fn export(
    format: ExportFormat,
    courses: &[Arc<Course>],
    ctx: &ExportContext<'_>,
) -> Result<Artifact, ExportError> {
    let content = match format {
        ExportFormat::ShellScript => shell::shell_script(courses, ctx),
        ExportFormat::ICalendar => ical::ical_text(courses, ctx),
        ExportFormat::Bookmarks => bookmarks::bookmark_html(courses, ctx),
        ExportFormat::Tsv => table::tsv(courses)?,
        ExportFormat::Csv => table::csv(courses)?,
    };
    let file_name = format.is_downloadable().then(|| ctx.file_name(format));
    log::info!(
        "exported {} course(s) as {} ({} bytes)",
        courses.len(),
        format,
        content.len()
    );
    Ok(Artifact {
        format,
        content,
        file_name,
    })
}
