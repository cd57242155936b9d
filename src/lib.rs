pub mod catalog;
pub mod config;
pub mod course;
pub mod export;
pub mod filter;
pub mod grid;
pub mod persistence;
pub mod selection;
pub mod session;

pub use catalog::{Catalog, CatalogError};
pub use config::{ConfigError, PeriodTime, TimetableConfig, academic_year};
pub use course::{Course, SlotCode, TimetableCode};
pub use export::{
    Artifact, CoursePath, ExportContext, ExportError, ExportFormat, derive_path, export,
    sanitize_title,
};
pub use filter::{FilterField, FilterState, candidates, matches};
pub use grid::ScheduleGrid;
#[cfg(feature = "sqlite")]
pub use persistence::SqliteStore;
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use selection::{Selection, ToggleOutcome};
pub use session::{Candidate, Session};
