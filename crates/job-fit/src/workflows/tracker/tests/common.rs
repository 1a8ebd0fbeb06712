use chrono::{NaiveDate, NaiveDateTime};

use crate::workflows::tracker::{MemoryWorkbook, TrackerSettings, DEFAULT_SHEET_NAME};

pub(super) const HEADER: [&str; 4] = ["Company", "Position", "Applied Date", "Job Description"];

pub(super) fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .expect("valid timestamp")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn settings(lookback_days: u32) -> TrackerSettings {
    TrackerSettings {
        lookback_days,
        ..TrackerSettings::default()
    }
}

/// Tracker sheet with the standard header followed by `rows`.
pub(super) fn tracker(rows: &[[&str; 4]]) -> MemoryWorkbook {
    let mut sheet = vec![HEADER.to_vec()];
    sheet.extend(rows.iter().map(|row| row.to_vec()));
    MemoryWorkbook::new().with_sheet(DEFAULT_SHEET_NAME, sheet)
}
