use crate::course::TimetableCode;
use crate::filter::FilterState;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::JsonFileStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Key holding the JSON array of selected timetable codes.
pub const SELECTED_COURSES_KEY: &str = "selectedCourses";
/// Key holding the serialized filter settings.
pub const FILTER_SETTINGS_KEY: &str = "filterSettings";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Synchronous string key-value surface standing in for browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Process-local store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::InvalidData("memory store mutex poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::InvalidData("memory store mutex poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn save_selected_codes<S: KeyValueStore + ?Sized>(
    store: &S,
    codes: &[TimetableCode],
) -> StoreResult<()> {
    let json = serde_json::to_string(codes)?;
    store.set(SELECTED_COURSES_KEY, &json)
}

/// Stored selection codes, or an empty list when nothing was stored.
pub fn load_selected_codes<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Vec<TimetableCode>> {
    match store.get(SELECTED_COURSES_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

pub fn save_filter_state<S: KeyValueStore + ?Sized>(store: &S, filters: &FilterState) -> StoreResult<()> {
    let json = serde_json::to_string(filters)?;
    store.set(FILTER_SETTINGS_KEY, &json)
}

pub fn load_filter_state<S: KeyValueStore + ?Sized>(store: &S) -> StoreResult<Option<FilterState>> {
    match store.get(FILTER_SETTINGS_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
