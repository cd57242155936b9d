use super::ExportContext;
use super::path::{CoursePath, derive_path};
use crate::course::Course;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::Arc;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>()（）「」、，。]+"#).expect("valid url pattern")
});

const PREAMBLE: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

/// Every URL mentioned in a free-text website field, in order, without repeats.
pub fn discover_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for found in URL_PATTERN.find_iter(text) {
        let url = found
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?'])
            .to_string();
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}

pub fn syllabus_url(course: &Course, ctx: &ExportContext<'_>) -> String {
    format!(
        "{}/{}/31/31_{}.html",
        ctx.config.syllabus_base_url.trim_end_matches('/'),
        ctx.academic_year(),
        course.timetable_code
    )
}

pub fn web_search_url(course: &Course, ctx: &ExportContext<'_>) -> String {
    let query = format!(
        "{} {} {}",
        course.title_ja, course.title_en, course.lecturer_name
    );
    format!(
        "{}{}",
        ctx.config.web_search_url,
        urlencoding::encode(query.trim())
    )
}

pub fn social_search_url(course: &Course, ctx: &ExportContext<'_>) -> String {
    let query = format!("{} {}", course.title_ja, course.title_en);
    format!(
        "{}{}",
        ctx.config.social_search_url,
        urlencoding::encode(query.trim())
    )
}

/// Website links found in the course text followed by the synthesized ones.
pub fn course_bookmarks(course: &Course, ctx: &ExportContext<'_>) -> Vec<Bookmark> {
    let mut bookmarks: Vec<Bookmark> = discover_urls(&course.website)
        .into_iter()
        .map(|url| Bookmark {
            title: format!("{} website", course.title_ja),
            url,
        })
        .collect();
    bookmarks.push(Bookmark {
        title: format!("{} syllabus", course.title_ja),
        url: syllabus_url(course, ctx),
    });
    bookmarks.push(Bookmark {
        title: format!("{} web search", course.title_ja),
        url: web_search_url(course, ctx),
    });
    bookmarks.push(Bookmark {
        title: format!("{} social search", course.title_ja),
        url: social_search_url(course, ctx),
    });
    bookmarks
}

// Courses without a usable first slot sort last.
fn by_first_slot(a: &Arc<Course>, b: &Arc<Course>) -> Ordering {
    match (a.first_slot(), b.first_slot()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

struct TermFolder<'a> {
    name: String,
    leaves: Vec<(String, Vec<&'a Arc<Course>>)>,
}

fn group_by_path<'a>(courses: &[&'a Arc<Course>], academic_year: i32) -> Vec<TermFolder<'a>> {
    let mut folders: Vec<TermFolder<'a>> = Vec::new();
    for &course in courses {
        let CoursePath { term_dir, leaf_dir } = derive_path(course, academic_year);
        let folder = match folders.iter().position(|f| f.name == term_dir) {
            Some(index) => &mut folders[index],
            None => {
                folders.push(TermFolder {
                    name: term_dir,
                    leaves: Vec::new(),
                });
                let last = folders.len() - 1;
                &mut folders[last]
            }
        };
        match folder.leaves.iter_mut().find(|(name, _)| *name == leaf_dir) {
            Some((_, members)) => members.push(course),
            None => folder.leaves.push((leaf_dir, vec![course])),
        }
    }
    folders
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Netscape bookmark file: one folder per year-term, one sub-folder per
/// course path, bookmarks inside.
pub fn bookmark_html(courses: &[Arc<Course>], ctx: &ExportContext<'_>) -> String {
    let mut ordered: Vec<&Arc<Course>> = courses.iter().collect();
    ordered.sort_by(|a, b| by_first_slot(a, b));
    let folders = group_by_path(&ordered, ctx.academic_year());

    let mut out = String::from(PREAMBLE);
    out.push_str("<DL><p>\n");
    for folder in &folders {
        out.push_str(&format!("    <DT><H3>{}</H3>\n", escape_html(&folder.name)));
        out.push_str("    <DL><p>\n");
        for (leaf, members) in &folder.leaves {
            out.push_str(&format!("        <DT><H3>{}</H3>\n", escape_html(leaf)));
            out.push_str("        <DL><p>\n");
            for course in members {
                for bookmark in course_bookmarks(course, ctx) {
                    out.push_str(&format!(
                        "            <DT><A HREF=\"{}\">{}</A>\n",
                        escape_html(&bookmark.url),
                        escape_html(&bookmark.title)
                    ));
                }
            }
            out.push_str("        </DL><p>\n");
        }
        out.push_str("    </DL><p>\n");
    }
    out.push_str("</DL><p>\n");
    out
}
