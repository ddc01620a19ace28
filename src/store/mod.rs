use crate::week::{AvailabilitySlot, Mission, WeekDay};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Serialization(SerdeJsonError),
    Csv(csv::Error),
    Io(io::Error),
    UnknownDay(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            StoreError::Serialization(err) => write!(f, "serialization error: {err}"),
            StoreError::Csv(err) => write!(f, "csv error: {err}"),
            StoreError::Io(err) => write!(f, "io error: {err}"),
            StoreError::UnknownDay(day) => write!(f, "stored row has unknown day '{day}'"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<csv::Error> for StoreError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One cell of a status update; cells that do not exist in the store are
/// silently skipped (the grid is seeded once, never grown).
#[derive(Debug, Clone, PartialEq)]
pub struct SlotUpdate {
    pub day: WeekDay,
    pub time_range: String,
    pub status: String,
}

/// The operations of the weekly schedule and mission store. Connection
/// lifetime is the implementation's concern; callers never manage it.
pub trait AgendaStore {
    /// Inserts a subject if absent; duplicates are not an error.
    fn add_subject(&self, name: &str) -> StoreResult<()>;
    fn list_subjects(&self) -> StoreResult<Vec<String>>;

    /// Inserts a staff member and seeds their weekly grid from the template
    /// staff's time ranges (or the default hourly template), plus the
    /// placeholder mission that anchors their task list.
    fn add_staff(&self, name: &str, subject: &str) -> StoreResult<()>;
    fn list_staff_by_subject(&self, subject: &str) -> StoreResult<Vec<String>>;

    fn get_availability(&self, staff: &str) -> StoreResult<Vec<AvailabilitySlot>>;
    fn set_availability(&self, staff: &str, updates: &[SlotUpdate]) -> StoreResult<()>;

    fn add_mission(&self, staff: &str, text: &str) -> StoreResult<i64>;
    fn pending_missions(&self, staff: &str) -> StoreResult<Vec<Mission>>;
    fn completed_missions(&self, staff: &str) -> StoreResult<Vec<Mission>>;
    /// Marks a mission completed; returns false when no such mission exists.
    fn complete_mission(&self, id: i64) -> StoreResult<bool>;
    /// Removes a mission; returns false when no such mission exists.
    fn delete_mission(&self, id: i64) -> StoreResult<bool>;
}

pub mod file;
pub mod sqlite;

pub use file::{
    WeekSnapshot, load_week_from_json, save_availability_to_csv, save_week_to_json, snapshot_week,
};
pub use sqlite::SqliteAgendaStore;
