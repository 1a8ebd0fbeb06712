use super::columns::ColumnLayout;
use super::normalizer::normalize_key;
use super::HistoryEntry;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

static ORDINAL_SUFFIX: OnceLock<Regex> = OnceLock::new();

fn ordinal_suffix() -> &'static Regex {
    ORDINAL_SUFFIX.get_or_init(|| {
        Regex::new(r"(\d+)(st|nd|rd|th)").expect("ordinal suffix pattern compiles")
    })
}

const TEXT_DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%b %d, %Y"];

/// Parse an applied-date cell such as `June 1st, 2025` or `Jun 01, 2025`.
///
/// ISO dates are accepted as the textual form of native spreadsheet date cells.
/// Anything else is an unknown date, never an error.
pub(crate) fn parse_applied_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = ordinal_suffix().replace_all(trimmed, "$1");
    for format in TEXT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Trailing window of applied dates that still count as recent applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    cutoff: NaiveDateTime,
}

impl LookbackWindow {
    /// A lookback reaching past the earliest representable date keeps every row.
    pub fn ending_at(now: NaiveDateTime, lookback_days: u32) -> Self {
        let cutoff = Duration::try_days(i64::from(lookback_days))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);
        Self { cutoff }
    }

    pub fn cutoff(&self) -> NaiveDateTime {
        self.cutoff
    }

    /// Dates are compared at midnight against the cutoff instant. Unknown dates are
    /// always inside the window.
    pub fn retains(&self, applied_date: Option<NaiveDate>) -> bool {
        match applied_date.and_then(|date| date.and_hms_opt(0, 0, 0)) {
            Some(applied_at) => applied_at >= self.cutoff,
            None => true,
        }
    }
}

/// Outcome of parsing the data rows of one tracker sheet.
#[derive(Debug, Default)]
pub(crate) struct ParsedSheet {
    pub(crate) entries: Vec<HistoryEntry>,
    pub(crate) missing_key: usize,
    pub(crate) outside_window: usize,
}

pub(crate) fn parse_rows(
    layout: &ColumnLayout,
    rows: &[Vec<String>],
    window: &LookbackWindow,
) -> ParsedSheet {
    let mut parsed = ParsedSheet::default();

    for row in rows {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let company = layout.company.cell(row).map(normalize_key).unwrap_or_default();
        let position = layout.position.cell(row).map(normalize_key).unwrap_or_default();
        if company.is_empty() || position.is_empty() {
            parsed.missing_key += 1;
            continue;
        }

        let applied_date = layout.applied_date.cell(row).and_then(parse_applied_date);
        if !window.retains(applied_date) {
            parsed.outside_window += 1;
            continue;
        }

        let description = layout
            .description
            .cell(row)
            .map(str::to_string)
            .unwrap_or_default();

        parsed.entries.push(HistoryEntry {
            company,
            position,
            description,
            applied_date,
        });
    }

    parsed
}
