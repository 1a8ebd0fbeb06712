use std::collections::HashMap;

use super::normalizer::normalize_header;

pub(crate) const COMPANY_HEADER: &str = "company";
pub(crate) const POSITION_HEADER: &str = "position";
pub(crate) const APPLIED_DATE_HEADER: &str = "applied date";
pub(crate) const DESCRIPTION_HEADER: &str = "job description";

/// How a tracker column was located in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnIndex {
    Named(usize),
    Fallback(usize),
    Absent,
}

impl ColumnIndex {
    fn resolve(headers: &HashMap<String, usize>, name: &str, fallback: Option<usize>) -> Self {
        match (headers.get(name), fallback) {
            (Some(index), _) => ColumnIndex::Named(*index),
            (None, Some(index)) => ColumnIndex::Fallback(index),
            (None, None) => ColumnIndex::Absent,
        }
    }

    pub fn position(self) -> Option<usize> {
        match self {
            ColumnIndex::Named(index) | ColumnIndex::Fallback(index) => Some(index),
            ColumnIndex::Absent => None,
        }
    }

    /// Cell content for this column, `None` when the column is absent or the row is
    /// shorter than the column index.
    pub fn cell<'a>(self, row: &'a [String]) -> Option<&'a str> {
        self.position()
            .and_then(|index| row.get(index))
            .map(String::as_str)
    }
}

/// Column positions of the tracker fields for one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub company: ColumnIndex,
    pub position: ColumnIndex,
    pub applied_date: ColumnIndex,
    pub description: ColumnIndex,
}

impl ColumnLayout {
    /// Resolve columns from the header row. Company, position and applied date fall
    /// back to columns 0, 1 and 2; the description column has no fallback.
    pub fn from_header(header: &[String]) -> Self {
        let mut headers = HashMap::new();
        for (index, cell) in header.iter().enumerate() {
            let name = normalize_header(cell);
            if !name.is_empty() {
                headers.insert(name, index);
            }
        }

        Self {
            company: ColumnIndex::resolve(&headers, COMPANY_HEADER, Some(0)),
            position: ColumnIndex::resolve(&headers, POSITION_HEADER, Some(1)),
            applied_date: ColumnIndex::resolve(&headers, APPLIED_DATE_HEADER, Some(2)),
            description: ColumnIndex::resolve(&headers, DESCRIPTION_HEADER, None),
        }
    }
}
