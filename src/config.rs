use crate::filter::FilterState;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown time zone '{0}'")]
    UnknownTimeZone(String),
    #[error("period {index} ends at {end} before it starts at {start}")]
    InvertedPeriod {
        index: usize,
        start: NaiveTime,
        end: NaiveTime,
    },
    #[error("first_monday {0} is not a Monday")]
    NotMonday(NaiveDate),
}

/// Clock times of one teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl PeriodTime {
    fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap_or_default(),
        }
    }
}

/// Academic-calendar settings used by the exporters and the initial filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    pub time_zone: String,
    pub root_directory: String,
    pub first_monday: NaiveDate,
    pub weeks: u32,
    pub periods: Vec<PeriodTime>,
    pub syllabus_base_url: String,
    pub web_search_url: String,
    pub social_search_url: String,
    pub default_filters: FilterState,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            time_zone: "Asia/Tokyo".to_string(),
            root_directory: "UEC".to_string(),
            first_monday: NaiveDate::from_ymd_opt(2025, 4, 14).unwrap_or_default(),
            weeks: 15,
            periods: vec![
                PeriodTime::hm((9, 0), (10, 30)),
                PeriodTime::hm((10, 40), (12, 10)),
                PeriodTime::hm((13, 0), (14, 30)),
                PeriodTime::hm((14, 40), (16, 10)),
                PeriodTime::hm((16, 15), (17, 45)),
            ],
            syllabus_base_url: "https://kyoumu.office.uec.ac.jp/syllabus".to_string(),
            web_search_url: "https://www.google.com/search?q=".to_string(),
            social_search_url: "https://twitter.com/search?q=".to_string(),
            default_filters: FilterState {
                term: Some("前学期".to_string()),
                academic_year: Some("3".to_string()),
                ..FilterState::default()
            },
        }
    }
}

impl TimetableConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tz()?;
        if self.first_monday.weekday() != chrono::Weekday::Mon {
            return Err(ConfigError::NotMonday(self.first_monday));
        }
        for (index, period) in self.periods.iter().enumerate() {
            if period.end < period.start {
                return Err(ConfigError::InvertedPeriod {
                    index,
                    start: period.start,
                    end: period.end,
                });
            }
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(self.time_zone.clone()))
    }

    pub fn period(&self, index: usize) -> Option<&PeriodTime> {
        self.periods.get(index)
    }

    /// Current wall-clock time in the configured zone.
    pub fn now(&self) -> Result<DateTime<Tz>, ConfigError> {
        Ok(self.tz()?.from_utc_datetime(&Utc::now().naive_utc()))
    }
}

/// Year the academic year containing `date` started in. January through March
/// still belong to the previous year.
pub fn academic_year<D: Datelike>(date: &D) -> i32 {
    if date.month0() <= 2 {
        date.year() - 1
    } else {
        date.year()
    }
}
