use super::ExportContext;
use super::path::derive_path;
use crate::course::Course;
use std::sync::Arc;

/// `mkdir -p ROOT/{"p1","p2",...}` with the quoted paths sorted.
pub fn shell_script(courses: &[Arc<Course>], ctx: &ExportContext<'_>) -> String {
    let year = ctx.academic_year();
    let mut paths: Vec<String> = courses
        .iter()
        .map(|course| quote(&derive_path(course, year).to_path()))
        .collect();
    paths.sort();
    format!(
        "mkdir -p {}/{{{}}}\n",
        ctx.config.root_directory,
        paths.join(",")
    )
}

// Double quotes stop brace and glob expansion but not `$` or backticks.
fn quote(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('"');
    for ch in path.chars() {
        if matches!(ch, '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
