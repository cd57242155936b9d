use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
#[cfg(target_os = "linux")]
use std::time::{Duration, Instant};
use timetable_builder::{
    Artifact, Catalog, ExportContext, ExportFormat, FilterField, JsonFileStore, KeyValueStore,
    Session, TimetableConfig, ToggleOutcome,
};
use tokio::task::JoinHandle;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Json,
    #[cfg(feature = "sqlite")]
    Sqlite,
}

#[derive(Parser)]
#[command(about = "Browse a course catalog and build a weekly timetable")]
struct Args {
    /// Course catalog (JSON array of course records)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    catalog: PathBuf,
    /// Where the selection and filters are kept between runs
    #[arg(long, default_value = "timetable-state.json", value_hint = clap::ValueHint::FilePath)]
    state: PathBuf,
    #[arg(long, value_enum, default_value = "json")]
    backend: Backend,
    /// Academic calendar settings (JSON); built-in defaults when omitted
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,
    /// Directory downloadable exports are written to
    #[arg(long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    out_dir: PathBuf,
    /// Do not copy exports to the clipboard
    #[arg(long)]
    no_clipboard: bool,
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  grid                                   Show the weekly grid\n  cell <day> <period>                    List courses for a cell (0-based, * = selected)\n  toggle <code>                          Add or remove a course by timetable code\n  remove <code>                          Remove a course by timetable code\n  selected                               List selected courses\n  info <code>                            Show course details\n  values <field>                         List values of term|opening|year|faculty|category|department\n  filter show                            Show active filters\n  filter <term|opening|year> <value|->   Set or clear a single-value filter\n  filter <faculty|category|department> <add|remove> <value>\n  filter <faculty|category|department> <all|clear>\n  export <sh|ics|bookmarks|tsv|csv>      Export the selection\n  quit|exit                              Exit"
    );
}

fn open_store(args: &Args) -> anyhow::Result<Box<dyn KeyValueStore>> {
    Ok(match args.backend {
        Backend::Json => Box::new(JsonFileStore::new(&args.state)),
        #[cfg(feature = "sqlite")]
        Backend::Sqlite => Box::new(
            timetable_builder::SqliteStore::new(&args.state)
                .with_context(|| format!("opening {}", args.state.display()))?,
        ),
    })
}

/// How long the clipboard owner stays alive after a copy on Linux, where the
/// text vanishes with its owner unless a clipboard manager takes it over.
#[cfg(target_os = "linux")]
const CLIPBOARD_HOLD: Duration = Duration::from_secs(5);

fn copy_to_clipboard(text: String) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        // returns once another client takes the selection or the hold expires
        clipboard
            .set()
            .wait_until(Instant::now() + CLIPBOARD_HOLD)
            .text(text)
    }
    #[cfg(not(target_os = "linux"))]
    {
        clipboard.set_text(text)
    }
}

/// Clipboard copy and file download run in the background; only their
/// outcome is logged.
fn deliver(artifact: &Artifact, args: &Args, pending: &mut Vec<JoinHandle<()>>) {
    if !args.no_clipboard {
        let text = artifact.content.clone();
        pending.push(tokio::spawn(async move {
            let copied = tokio::task::spawn_blocking(move || copy_to_clipboard(text)).await;
            match copied {
                Ok(Ok(())) => log::info!("copied export to clipboard"),
                Ok(Err(err)) => log::error!("failed to copy text: {err}"),
                Err(err) => log::error!("clipboard task failed: {err}"),
            }
        }));
    }

    if let Some(name) = &artifact.file_name {
        let path = args.out_dir.join(name);
        let bytes = artifact.content.clone().into_bytes();
        pending.push(tokio::spawn(async move {
            match tokio::fs::write(&path, bytes).await {
                Ok(()) => log::info!("saved {}", path.display()),
                Err(err) => log::error!("failed to save {}: {err}", path.display()),
            }
        }));
    }
}

fn parse_code(arg: Option<&str>, usage: &str) -> Option<u32> {
    match arg.map(str::parse::<u32>) {
        Some(Ok(code)) => Some(code),
        Some(Err(_)) => {
            println!("Invalid timetable code");
            None
        }
        None => {
            println!("Usage: {usage}");
            None
        }
    }
}

fn handle_filter<'a>(session: &mut Session, mut parts: impl Iterator<Item = &'a str>) {
    let Some(target) = parts.next() else {
        println!("Usage: filter show | filter <field> ...");
        return;
    };
    if target == "show" {
        println!("{}", session.filters().summary());
        return;
    }
    let field: FilterField = match target.parse() {
        Ok(field) => field,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    let action = parts.next();
    let rest = parts.collect::<Vec<_>>().join(" ");

    if !field.is_multi() {
        let value = match action {
            Some("-") | None => None,
            Some(first) => Some(if rest.is_empty() {
                first.to_string()
            } else {
                format!("{first} {rest}")
            }),
        };
        session.update_filters(|filters, _| filters.set(field, value));
    } else {
        match action {
            Some("add") if !rest.is_empty() => {
                session.update_filters(|filters, _| {
                    filters.add_value(field, rest.clone());
                });
            }
            Some("remove") if !rest.is_empty() => {
                session.update_filters(|filters, _| {
                    filters.remove_value(field, &rest);
                });
            }
            Some("all") => session.update_filters(|filters, catalog| filters.select_all(field, catalog)),
            Some("clear") => session.update_filters(|filters, _| filters.clear(field)),
            _ => {
                println!("Usage: filter {field} <add|remove> <value> | filter {field} <all|clear>");
                return;
            }
        }
    }
    println!("{}", session.filters().summary());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TimetableConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TimetableConfig::default(),
    };
    let catalog = Arc::new(
        Catalog::load(&args.catalog)
            .with_context(|| format!("loading catalog {}", args.catalog.display()))?,
    );
    let store = open_store(&args)?;
    let mut session = Session::with_config(catalog, store, &config);
    let mut pending: Vec<JoinHandle<()>> = Vec::new();

    println!("Timetable Builder (CLI) - type 'help' for commands\n");
    println!("{}", session.grid().to_text_table());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "grid" => println!("{}", session.grid().to_text_table()),
            "cell" => {
                let day = parts.next().and_then(|s| s.parse::<usize>().ok());
                let period = parts.next().and_then(|s| s.parse::<usize>().ok());
                match (day, period) {
                    (Some(day), Some(period)) => {
                        let candidates = session.candidates(day, period);
                        if candidates.is_empty() {
                            println!("No courses match the current filters.");
                        }
                        for candidate in candidates {
                            let course = &candidate.course;
                            println!(
                                "{} {:>6}  {} - {}",
                                if candidate.selected { "*" } else { " " },
                                course.timetable_code,
                                course.title_ja,
                                course.department.chars().take(50).collect::<String>()
                            );
                        }
                    }
                    _ => println!("Usage: cell <day> <period>"),
                }
            }
            "toggle" => {
                if let Some(code) = parse_code(parts.next(), "toggle <code>") {
                    match session.toggle(code) {
                        Some(ToggleOutcome::Added) => println!("Added course {code}."),
                        Some(ToggleOutcome::Removed) => println!("Removed course {code}."),
                        None => println!("Course {code} not found."),
                    }
                }
            }
            "remove" => {
                if let Some(code) = parse_code(parts.next(), "remove <code>") {
                    if session.remove(code) {
                        println!("Removed course {code}.");
                    } else {
                        println!("Course {code} is not selected.");
                    }
                }
            }
            "selected" => {
                for course in session.selection().iter() {
                    println!(
                        "{:>6}  [{}]  {} ({})",
                        course.timetable_code,
                        course.slots.join(","),
                        course.title_ja,
                        course.title_en
                    );
                }
                println!("{} course(s) selected.", session.selection().len());
            }
            "info" => {
                if let Some(code) = parse_code(parts.next(), "info <code>") {
                    match session.catalog().find(code) {
                        Some(course) => print!("{}", course.detail_card()),
                        None => println!("Course {code} not found."),
                    }
                }
            }
            "values" => match parts.next().map(str::parse::<FilterField>) {
                Some(Ok(field)) => {
                    for value in session.unique_values(field) {
                        println!("  {value}");
                    }
                }
                Some(Err(err)) => println!("{err}"),
                None => println!("Usage: values <field>"),
            },
            "filter" => handle_filter(&mut session, parts),
            "export" => match parts.next().map(str::parse::<ExportFormat>) {
                Some(Ok(format)) => {
                    let ctx = ExportContext::new(&config)?;
                    match session.export(format, &ctx) {
                        Ok(artifact) => {
                            println!("{}", artifact.content);
                            if let Some(name) = &artifact.file_name {
                                println!("Saving as {}", args.out_dir.join(name).display());
                            }
                            deliver(&artifact, &args, &mut pending);
                        }
                        Err(err) => println!("Export error: {err}"),
                    }
                }
                Some(Err(err)) => println!("{err}"),
                None => println!("Usage: export <sh|ics|bookmarks|tsv|csv>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }

    for handle in pending {
        if let Err(err) = handle.await {
            log::error!("background task failed: {err}");
        }
    }
    Ok(())
}
