use chrono::TimeZone;
use chrono_tz::Asia::Tokyo;
use std::sync::Arc;
use timetable_builder::export::bookmarks::{
    discover_urls, social_search_url, syllabus_url, web_search_url,
};
use timetable_builder::export::path::{half_flag, quarter_code};
use timetable_builder::{
    Course, ExportContext, ExportFormat, TimetableConfig, derive_path, export, sanitize_title,
};

fn config() -> TimetableConfig {
    TimetableConfig::default()
}

// February 2025 still belongs to academic year 2024.
fn context(config: &TimetableConfig) -> ExportContext<'_> {
    ExportContext::at(config, Tokyo.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap())
}

fn intro() -> Arc<Course> {
    let mut course = Course::new(31001, "入門", "Introduction to ⅲ");
    course.term = "前学期".into();
    course.slots = vec!["0:0".into(), "2:1".into()];
    course.code = "ABC101".into();
    course.lecturer_name = "Taro Yamada".into();
    course.website = "Site: https://example.com/course (mirror: http://mirror.example.org/c)".into();
    Arc::new(course)
}

fn data_structures() -> Arc<Course> {
    let mut course = Course::new(31002, "データ構造", "Data Structures");
    course.term = "秋学期".into();
    course.slots = vec!["4:2".into()];
    course.code = "ABC202".into();
    course.lecturer_name = "Hanako Sato".into();
    Arc::new(course)
}

#[test]
fn term_flags_follow_first_character() {
    assert_eq!(half_flag("前学期"), 0);
    assert_eq!(half_flag("後学期"), 1);
    assert_eq!(half_flag("秋学期"), 1);
    assert_eq!(quarter_code("秋学期"), "Q3");
    assert_eq!(quarter_code("春学期"), "Q1");
    assert_eq!(quarter_code("前学期"), "");
}

#[test]
fn titles_are_sanitized_for_paths() {
    assert_eq!(sanitize_title("Introduction to ⅲ"), "introduction-to-3");
    assert_eq!(sanitize_title("Data Structures"), "data-structures");
}

#[test]
fn path_omits_missing_parts() {
    let path = derive_path(&intro(), 2024);
    assert_eq!(path.term_dir, "2024-0");
    assert_eq!(path.leaf_dir, "1.1-introduction-to-3");

    let path = derive_path(&data_structures(), 2024);
    assert_eq!(path.to_path(), "2024-1/Q3-5.3-data-structures/");

    let unscheduled = Course::new(1, "集中", "Intensive");
    assert_eq!(derive_path(&unscheduled, 2024).to_path(), "2024-0/intensive/");
}

#[test]
fn shell_script_for_empty_selection() {
    let config = config();
    let artifact = export(ExportFormat::ShellScript, &[], &context(&config)).unwrap();
    assert_eq!(artifact.content, "mkdir -p UEC/{}\n");
    assert_eq!(artifact.file_name, None);
}

#[test]
fn shell_script_lists_sorted_quoted_paths() {
    let config = config();
    let courses = vec![data_structures(), intro()];
    let artifact = export(ExportFormat::ShellScript, &courses, &context(&config)).unwrap();
    assert_eq!(
        artifact.content,
        "mkdir -p UEC/{\"2024-0/1.1-introduction-to-3/\",\"2024-1/Q3-5.3-data-structures/\"}\n"
    );
}

#[test]
fn calendar_has_one_weekly_event_per_slot() {
    let config = config();
    let artifact = export(ExportFormat::ICalendar, &[intro()], &context(&config)).unwrap();
    let text = artifact.content.replace("\r\n ", "");

    assert!(text.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(text.matches("BEGIN:VEVENT").count(), 2);
    assert!(text.contains("DTSTART;TZID=Asia/Tokyo:20250414T090000"));
    assert!(text.contains("DTEND;TZID=Asia/Tokyo:20250414T103000"));
    assert!(text.contains("DTSTART;TZID=Asia/Tokyo:20250416T104000"));
    assert!(text.contains("FREQ=WEEKLY"));
    assert!(text.contains("COUNT=15"));
    assert!(text.contains("SUMMARY:入門 (Introduction to ⅲ)"));
    assert!(text.contains("Lecturer: Taro Yamada"));
    assert!(text.contains("Code: ABC101"));
    assert!(text.contains("Website: Site: https://example.com/course"));
    assert_eq!(
        artifact.file_name.as_deref(),
        Some("timetable-2025-02-10T120000.ics")
    );
}

#[test]
fn calendar_skips_slots_without_clock_time() {
    let config = config();
    let mut course = Course::new(5, "実験", "Lab");
    course.slots = vec!["6:0".into(), "0:5".into()];
    let artifact = export(ExportFormat::ICalendar, &[Arc::new(course)], &context(&config)).unwrap();
    assert_eq!(artifact.content.matches("BEGIN:VEVENT").count(), 0);
    assert!(artifact.content.contains("END:VCALENDAR"));
}

#[test]
fn urls_are_discovered_in_free_text() {
    assert_eq!(
        discover_urls("Site: https://example.com/course (mirror: http://mirror.example.org/c)"),
        vec!["https://example.com/course", "http://mirror.example.org/c"]
    );
    assert_eq!(
        discover_urls("see https://a.example/x. and https://a.example/x"),
        vec!["https://a.example/x"]
    );
    assert!(discover_urls("no links here").is_empty());
}

#[test]
fn bookmarks_nest_folders_by_path() {
    let config = config();
    let ctx = context(&config);
    let courses = vec![data_structures(), intro()];
    let artifact = export(ExportFormat::Bookmarks, &courses, &ctx).unwrap();
    let html = &artifact.content;

    assert!(html.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
    assert_eq!(html.matches("<DL><p>").count(), html.matches("</DL><p>").count());
    assert_eq!(html.matches("<DL><p>").count(), 5);
    assert!(html.contains("https://kyoumu.office.uec.ac.jp/syllabus/2024/31/31_31001.html"));
    assert!(html.contains("<DT><A HREF=\"https://example.com/course\">"));
    assert!(html.contains("<DT><A HREF=\"http://mirror.example.org/c\">"));
    assert!(html.contains("<DT><H3>1.1-introduction-to-3</H3>"));
    assert!(html.contains(
        "https://www.google.com/search?q=%E5%85%A5%E9%96%80%20Introduction%20to%20%E2%85%B2%20Taro%20Yamada"
    ));
    assert!(html.contains(
        "https://twitter.com/search?q=%E5%85%A5%E9%96%80%20Introduction%20to%20%E2%85%B2\""
    ));

    let first = html.find("<H3>2024-0</H3>").unwrap();
    let second = html.find("<H3>2024-1</H3>").unwrap();
    assert!(first < second);
    assert!(artifact.file_name.unwrap().starts_with("bookmarks-"));
}

#[test]
fn syllabus_url_uses_academic_year() {
    let config = config();
    let spring = ExportContext::at(&config, Tokyo.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap());
    assert_eq!(
        syllabus_url(&data_structures(), &spring),
        "https://kyoumu.office.uec.ac.jp/syllabus/2025/31/31_31002.html"
    );
}

#[test]
fn search_urls_encode_titles_and_lecturer() {
    let config = config();
    let ctx = context(&config);
    let mut course = Course::new(31003, "入門", "Intro & Co");
    course.lecturer_name = "Taro".into();

    assert_eq!(
        web_search_url(&course, &ctx),
        "https://www.google.com/search?q=%E5%85%A5%E9%96%80%20Intro%20%26%20Co%20Taro"
    );
    assert_eq!(
        social_search_url(&course, &ctx),
        "https://twitter.com/search?q=%E5%85%A5%E9%96%80%20Intro%20%26%20Co"
    );
}

#[test]
fn tsv_has_header_and_one_row_per_course() {
    let config = config();
    let artifact = export(ExportFormat::Tsv, &[intro()], &context(&config)).unwrap();
    let lines: Vec<&str> = artifact.content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "course_schedule_day_and_period\tcourse_schedule_timetable_code\tcourse_title_ja\tcourse_title_en\tcode\tlecturer_name",
            "0:0,2:1\t31001\t入門\tIntroduction to ⅲ\tABC101\tTaro Yamada",
        ]
    );
}

#[test]
fn csv_quotes_joined_slots() {
    let config = config();
    let artifact = export(ExportFormat::Csv, &[intro()], &context(&config)).unwrap();
    assert!(artifact
        .content
        .contains("\"0:0,2:1\",31001,入門,Introduction to ⅲ,ABC101,Taro Yamada"));
}

#[test]
fn export_formats_parse_aliases() {
    assert_eq!("ical".parse::<ExportFormat>(), Ok(ExportFormat::ICalendar));
    assert_eq!("html".parse::<ExportFormat>(), Ok(ExportFormat::Bookmarks));
    assert_eq!("SH".parse::<ExportFormat>(), Ok(ExportFormat::ShellScript));
    assert!("pdf".parse::<ExportFormat>().is_err());
    for format in ExportFormat::ALL {
        assert_eq!(format.as_str().parse::<ExportFormat>(), Ok(format));
    }
}
