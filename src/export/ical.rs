use super::ExportContext;
use crate::course::{Course, SlotCode};
use crate::grid::DAYS;
use chrono::{Duration, NaiveDateTime};
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};
use std::sync::Arc;

/// One weekly recurring event per (course, slot), anchored to the configured
/// first Monday and expressed in the configured zone.
pub fn create_calendar(courses: &[Arc<Course>], ctx: &ExportContext<'_>) -> Calendar {
    let tzid = ctx.tz_name();
    let mut calendar = Calendar::new();
    calendar.name(&ctx.config.root_directory);
    calendar.timezone(tzid);

    for course in courses {
        for slot in course.parsed_slots() {
            let Some((start, end)) = slot_times(slot, ctx) else {
                log::debug!(
                    "course {} slot {} has no calendar time, skipping",
                    course.timetable_code,
                    slot
                );
                continue;
            };

            let event = Event::new()
                .uid(&format!(
                    "{}-{}-{}@{}",
                    course.timetable_code,
                    slot.day,
                    slot.period,
                    ctx.config.root_directory.to_lowercase()
                ))
                .summary(&format!("{} ({})", course.title_ja, course.title_en))
                .description(&format!(
                    "Lecturer: {} | Code: {} | Website: {}",
                    course.lecturer_name, course.code, course.website
                ))
                .starts(CalendarDateTime::WithTimezone {
                    date_time: start,
                    tzid: tzid.to_string(),
                })
                .ends(CalendarDateTime::WithTimezone {
                    date_time: end,
                    tzid: tzid.to_string(),
                })
                // repeat weekly for the length of the term
                .add_property(
                    "RRULE",
                    rrule::RRule::new(rrule::Frequency::Weekly)
                        .count(ctx.config.weeks)
                        .to_string(),
                )
                .done();

            calendar.push(event);
        }
    }

    calendar
}

/// Local start and end of the first occurrence of `slot`. The "Others"
/// column and periods without a clock time have none.
fn slot_times(slot: SlotCode, ctx: &ExportContext<'_>) -> Option<(NaiveDateTime, NaiveDateTime)> {
    if slot.day >= DAYS - 1 {
        return None;
    }
    let period = ctx.config.period(slot.period)?;
    let day = ctx.config.first_monday + Duration::days(i64::try_from(slot.day).ok()?);
    Some((day.and_time(period.start), day.and_time(period.end)))
}

pub fn ical_text(courses: &[Arc<Course>], ctx: &ExportContext<'_>) -> String {
    create_calendar(courses, ctx).to_string()
}
