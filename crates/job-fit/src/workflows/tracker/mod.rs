//! Job tracker history: the recent window of past applications used for duplicate
//! checks.
//!
//! A missing workbook, missing sheet or unreadable sheet never stops a run. The
//! store degrades to [`HistoryStore::Unavailable`], which reports every job as not
//! yet applied to.

mod columns;
mod log;
mod normalizer;
pub(crate) mod parser;
mod workbook;

#[cfg(test)]
mod tests;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub use columns::{ColumnIndex, ColumnLayout};
pub use self::log::{ApplicationLogEntry, LOG_HEADER};
pub(crate) use normalizer::normalize_key;
pub use parser::LookbackWindow;
pub use workbook::{CsvWorkbook, MemoryWorkbook, SheetRows, TrackerSource};

pub const DEFAULT_SHEET_NAME: &str = "Job Tracker";
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 92;

/// Which sheet to read, how far back applications count, and how similar two
/// descriptions must be to count as the same posting (0-100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSettings {
    pub sheet_name: String,
    pub lookback_days: u32,
    pub similarity_threshold: u8,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// One normalized row of the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub company: String,
    pub position: String,
    pub description: String,
    pub applied_date: Option<NaiveDate>,
}

/// Why the tracker could not provide history for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    MissingWorkbook(PathBuf),
    MissingSheet(String),
    Unreadable(String),
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::MissingWorkbook(path) => {
                write!(f, "tracker not found at {}", path.display())
            }
            UnavailableReason::MissingSheet(sheet) => {
                write!(f, "sheet '{sheet}' not found in tracker")
            }
            UnavailableReason::Unreadable(detail) => write!(f, "tracker unreadable: {detail}"),
        }
    }
}

/// Past applications loaded once per run, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStore {
    Loaded(Vec<HistoryEntry>),
    Unavailable(UnavailableReason),
}

impl HistoryStore {
    /// Load the applications inside the lookback window ending at `now`.
    pub fn load<S>(source: &S, settings: &TrackerSettings, now: NaiveDateTime) -> Self
    where
        S: TrackerSource + ?Sized,
    {
        let window = LookbackWindow::ending_at(now, settings.lookback_days);
        Self::load_window(source, &settings.sheet_name, &window)
    }

    pub fn load_window<S>(source: &S, sheet: &str, window: &LookbackWindow) -> Self
    where
        S: TrackerSource + ?Sized,
    {
        let rows = match source.read_sheet(sheet) {
            Ok(Some(rows)) => rows,
            Ok(None) => {
                return Self::unavailable(UnavailableReason::MissingSheet(sheet.to_string()))
            }
            Err(TrackerError::MissingWorkbook(path)) => {
                return Self::unavailable(UnavailableReason::MissingWorkbook(path))
            }
            Err(err) => return Self::unavailable(UnavailableReason::Unreadable(err.to_string())),
        };

        let Some((header, data)) = rows.split_first() else {
            debug!(sheet, "tracker sheet is empty");
            return HistoryStore::Loaded(Vec::new());
        };

        let layout = ColumnLayout::from_header(header);
        let parsed = parser::parse_rows(&layout, data, window);
        info!(
            sheet,
            entries = parsed.entries.len(),
            skipped_incomplete = parsed.missing_key,
            skipped_stale = parsed.outside_window,
            cutoff = %window.cutoff(),
            "loaded application history"
        );

        HistoryStore::Loaded(parsed.entries)
    }

    fn unavailable(reason: UnavailableReason) -> Self {
        warn!(%reason, "skipping duplicate filtering");
        HistoryStore::Unavailable(reason)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        match self {
            HistoryStore::Loaded(entries) => entries,
            HistoryStore::Unavailable(_) => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, HistoryStore::Loaded(_))
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Tracker storage failures. History loading converts these into
/// [`HistoryStore::Unavailable`]; only the log writer surfaces them.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("tracker workbook not found at {}", .0.display())]
    MissingWorkbook(PathBuf),
    #[error("tracker io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tracker CSV data: {0}")]
    Csv(#[from] csv::Error),
}
