//! Folder naming shared by the shell-script and bookmark exports.
//!
//! A course maps to `{year}-{half}/{quarter}-{day.period}-{title}/`, where the
//! quarter part (and its hyphen) disappears for terms without a quarter, and
//! the slot part disappears for courses without a usable first slot.

use crate::course::Course;
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[_\s,."'{}/\\・¥-]+"#).expect("valid separator pattern"));

const SMALL_NUMERALS: [char; 12] = [
    'ⅰ', 'ⅱ', 'ⅲ', 'ⅳ', 'ⅴ', 'ⅵ', 'ⅶ', 'ⅷ', 'ⅸ', 'ⅹ', 'ⅺ', 'ⅻ',
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoursePath {
    /// `{year}-{half}`
    pub term_dir: String,
    /// `{quarter}-{day.period}-{title}`
    pub leaf_dir: String,
}

impl CoursePath {
    pub fn to_path(&self) -> String {
        format!("{}/{}/", self.term_dir, self.leaf_dir)
    }
}

pub fn derive_path(course: &Course, academic_year: i32) -> CoursePath {
    let term_dir = format!("{}-{}", academic_year, half_flag(&course.term));

    let mut leaf_dir = String::new();
    let quarter = quarter_code(&course.term);
    if !quarter.is_empty() {
        leaf_dir.push_str(quarter);
        leaf_dir.push('-');
    }
    if let Some(slot) = slot_segment(course) {
        leaf_dir.push_str(&slot);
        leaf_dir.push('-');
    }
    leaf_dir.push_str(&sanitize_title(&course.title_en));

    CoursePath { term_dir, leaf_dir }
}

/// 1 for second-half terms (後, 秋, 冬), 0 otherwise.
pub fn half_flag(term: &str) -> u8 {
    match term.chars().next() {
        Some('後' | '秋' | '冬') => 1,
        _ => 0,
    }
}

pub fn quarter_code(term: &str) -> &'static str {
    match term.chars().next() {
        Some('春') => "Q1",
        Some('夏') => "Q2",
        Some('秋') => "Q3",
        Some('冬') => "Q4",
        _ => "",
    }
}

/// First slot with both indices shifted to one-based, joined by a dot.
pub fn slot_segment(course: &Course) -> Option<String> {
    let slot = course.first_slot()?;
    Some(format!("{}.{}", slot.day + 1, slot.period + 1))
}

pub fn sanitize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let collapsed = SEPARATOR_RUN.replace_all(&lowered, "-");
    numerals_to_ascii(&collapsed)
}

/// Rewrite ⅰ..ⅻ to 1..12. A run of numerals gets a leading hyphen unless it
/// starts the string or follows `-`, `_` or `.`.
fn numerals_to_ascii(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous: Option<char> = None;
    let mut previous_was_numeral = false;

    for ch in input.chars() {
        match SMALL_NUMERALS.iter().position(|&n| n == ch) {
            Some(index) => {
                let needs_hyphen = !previous_was_numeral
                    && previous.is_some_and(|p| !matches!(p, '-' | '_' | '.'));
                if needs_hyphen {
                    out.push('-');
                }
                out.push_str(&(index + 1).to_string());
                previous_was_numeral = true;
            }
            None => {
                out.push(ch);
                previous_was_numeral = false;
            }
        }
        previous = Some(ch);
    }
    out
}
