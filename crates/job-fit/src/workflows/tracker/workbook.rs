use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::log::{ApplicationLogEntry, LOG_HEADER};
use super::TrackerError;

/// Rows of one sheet, header row first.
pub type SheetRows = Vec<Vec<String>>;

/// Read access to a tabular tracker made of named sheets.
pub trait TrackerSource: Send + Sync {
    /// Return every row of `sheet`, or `None` when the workbook has no such sheet.
    fn read_sheet(&self, sheet: &str) -> Result<Option<SheetRows>, TrackerError>;
}

/// Workbook stored as a directory with one CSV file per sheet (`<sheet>.csv`).
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    root: PathBuf,
}

impl CsvWorkbook {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.root.join(format!("{sheet}.csv"))
    }

    /// Append one application row, creating the workbook and the sheet (with its
    /// header row) when they do not exist yet.
    pub fn append_application(
        &self,
        sheet: &str,
        entry: &ApplicationLogEntry,
    ) -> Result<PathBuf, TrackerError> {
        fs::create_dir_all(&self.root)?;
        let path = self.sheet_path(sheet);
        let needs_header = match fs::metadata(&path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_HEADER)?;
        }
        writer.write_record(entry.to_record())?;
        writer.flush()?;

        Ok(path)
    }
}

impl TrackerSource for CsvWorkbook {
    fn read_sheet(&self, sheet: &str) -> Result<Option<SheetRows>, TrackerError> {
        if !self.root.is_dir() {
            return Err(TrackerError::MissingWorkbook(self.root.clone()));
        }

        let path = self.sheet_path(sheet);
        if !path.is_file() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Some(rows))
    }
}

/// In-memory workbook for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, SheetRows>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet<S, R, C>(mut self, name: S, rows: R) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.insert(name.into(), rows);
        self
    }
}

impl TrackerSource for MemoryWorkbook {
    fn read_sheet(&self, sheet: &str) -> Result<Option<SheetRows>, TrackerError> {
        Ok(self.sheets.get(sheet).cloned())
    }
}
