use std::fs;

use super::common::*;
use crate::workflows::tracker::{
    ApplicationLogEntry, CsvWorkbook, HistoryStore, TrackerError, TrackerSource,
    UnavailableReason, DEFAULT_SHEET_NAME,
};

fn entry(company: &str, description: Option<&str>) -> ApplicationLogEntry {
    ApplicationLogEntry {
        company: company.to_string(),
        position: "QA Automation Developer".to_string(),
        applied_on: date(2025, 6, 1),
        description: description.map(str::to_string),
    }
}

#[test]
fn missing_directory_is_reported_and_degrades() {
    let dir = tempfile::tempdir().expect("tempdir");
    let workbook = CsvWorkbook::new(dir.path().join("absent"));

    match workbook.read_sheet(DEFAULT_SHEET_NAME) {
        Err(TrackerError::MissingWorkbook(path)) => assert!(path.ends_with("absent")),
        other => panic!("expected missing workbook, got {other:?}"),
    }

    let store = HistoryStore::load(&workbook, &settings(90), at(2025, 8, 15));
    assert!(matches!(
        store,
        HistoryStore::Unavailable(UnavailableReason::MissingWorkbook(_))
    ));
}

#[test]
fn missing_sheet_file_reads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    let workbook = CsvWorkbook::new(dir.path());
    assert!(workbook
        .read_sheet(DEFAULT_SHEET_NAME)
        .expect("readable")
        .is_none());
}

#[test]
fn append_creates_sheet_with_header_then_appends() {
    let dir = tempfile::tempdir().expect("tempdir");
    let workbook = CsvWorkbook::new(dir.path().join("tracker"));

    let path = workbook
        .append_application(DEFAULT_SHEET_NAME, &entry("TD Bank", None))
        .expect("first append");
    workbook
        .append_application(DEFAULT_SHEET_NAME, &entry("Contoso", Some("Azure, M365 \"support\"")))
        .expect("second append");

    assert_eq!(path, dir.path().join("tracker").join("Job Tracker.csv"));
    let rows = workbook
        .read_sheet(DEFAULT_SHEET_NAME)
        .expect("readable")
        .expect("sheet exists");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], HEADER.map(String::from).to_vec());
    assert_eq!(rows[1][0], "TD Bank");
    assert_eq!(rows[1][2], "June 01, 2025");
    assert_eq!(rows[1][3], "");
    assert_eq!(rows[2][3], "Azure, M365 \"support\"");
}

#[test]
fn ragged_and_padded_cells_are_trimmed() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("Job Tracker.csv"),
        "Company,Position,Applied Date\n  Acme , Engineer ,\"June 1, 2025\"\nGlobex,Analyst\n",
    )
    .expect("write sheet");
    let workbook = CsvWorkbook::new(dir.path());

    let rows = workbook
        .read_sheet(DEFAULT_SHEET_NAME)
        .expect("readable")
        .expect("sheet exists");

    assert_eq!(rows[1][0], "Acme");
    assert_eq!(rows[1][1], "Engineer");
    assert_eq!(rows[2].len(), 2);
}

#[test]
fn logged_application_is_loaded_back_as_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let workbook = CsvWorkbook::new(dir.path());
    workbook
        .append_application(DEFAULT_SHEET_NAME, &entry("TD Bank", Some("Selenium")))
        .expect("append");

    let store = HistoryStore::load(&workbook, &settings(90), at(2025, 8, 15));

    assert_eq!(store.len(), 1);
    let loaded = &store.entries()[0];
    assert_eq!(loaded.company, "td bank");
    assert_eq!(loaded.applied_date, Some(date(2025, 6, 1)));
    assert_eq!(loaded.description, "Selenium");
}
