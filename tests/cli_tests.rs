#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  {
    "course_title_ja": "入門",
    "course_title_en": "Introduction",
    "course_schedule_term": "前学期",
    "course_schedule_day_and_period": ["0:0"],
    "course_schedule_timetable_code": 31001,
    "offering_year_offered": ["3"],
    "offering_department": "Ⅰ類",
    "lecturer_name": "Taro Yamada"
  },
  {
    "course_title_ja": "演習",
    "course_title_en": "Exercise",
    "course_schedule_term": "後学期",
    "course_schedule_day_and_period": ["0:0"],
    "course_schedule_timetable_code": 31002,
    "offering_year_offered": ["3"],
    "offering_department": "Ⅱ類"
  }
]"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    std::fs::write(dir.path().join("catalog.json"), CATALOG).expect("write catalog");
    dir
}

#[allow(deprecated)]
fn cli_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.arg("--catalog")
        .arg(dir.join("catalog.json"))
        .arg("--state")
        .arg(dir.join("state.json"))
        .arg("--out-dir")
        .arg(dir);
    cmd
}

fn run_cli(dir: &Path, script: &str) -> assert_cmd::assert::Assert {
    cli_command(dir)
        .arg("--no-clipboard")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn cli_toggles_and_exports_selection() {
    let dir = workspace();
    run_cli(dir.path(), "toggle 31001\nselected\nexport sh\nquit\n")
        .success()
        .stdout(str_contains("Added course 31001."))
        .stdout(str_contains("1 course(s) selected."))
        .stdout(str_contains("mkdir -p UEC/{\""));
}

#[test]
fn cli_reports_unknown_courses() {
    let dir = workspace();
    run_cli(dir.path(), "toggle 4242\nremove 31001\nquit\n")
        .success()
        .stdout(str_contains("Course 4242 not found."))
        .stdout(str_contains("Course 31001 is not selected."));
}

#[test]
fn cli_restores_selection_between_runs() {
    let dir = workspace();
    run_cli(dir.path(), "toggle 31001\nquit\n").success();
    run_cli(dir.path(), "selected\ntoggle 31001\nquit\n")
        .success()
        .stdout(str_contains("1 course(s) selected."))
        .stdout(str_contains("Removed course 31001."));
}

#[test]
fn cli_cell_listing_follows_filters() {
    let dir = workspace();
    let assert = run_cli(
        dir.path(),
        "cell 0 0\nfilter term 後学期\ncell 0 0\nfilter term -\nfilter department add Ⅱ類\ncell 0 0\nquit\n",
    )
    .success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let sections: Vec<&str> = output.split("department :").collect();
    assert!(output.contains("31001  入門"), "default filters show the spring course");
    assert!(output.contains("31002  演習"), "autumn filter shows the autumn course");
    let last = sections.last().copied().unwrap_or_default();
    assert!(last.contains("31002"));
    assert!(!last.contains("31001"));
}

#[test]
fn cli_writes_downloadable_exports() {
    let dir = workspace();
    run_cli(dir.path(), "toggle 31001\nexport ics\nquit\n")
        .success()
        .stdout(str_contains("BEGIN:VCALENDAR"))
        .stdout(str_contains("Saving as"));

    let written = std::fs::read_dir(dir.path())
        .expect("read out dir")
        .filter_map(Result::ok)
        .any(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            name.starts_with("timetable-") && name.ends_with(".ics")
        });
    assert!(written, "calendar file should be saved in the output directory");
}

#[test]
fn cli_export_completes_with_clipboard_enabled() {
    let dir = workspace();
    cli_command(dir.path())
        .write_stdin("toggle 31001\nexport tsv\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("course_schedule_day_and_period"))
        .stdout(str_contains("31001"));
}
