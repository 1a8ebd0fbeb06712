use super::common::*;
use crate::workflows::tracker::{
    ColumnIndex, ColumnLayout, HistoryStore, MemoryWorkbook, UnavailableReason,
};

#[test]
fn rows_older_than_lookback_are_excluded() {
    let source = tracker(&[
        ["TD Bank", "QA Automation Developer", "June 1, 2025", ""],
        ["Contoso", "Cloud Support Engineer", "August 30th, 2025", "Azure"],
    ]);

    let store = HistoryStore::load(&source, &settings(10), at(2025, 9, 4));

    let companies: Vec<_> = store.entries().iter().map(|e| e.company.as_str()).collect();
    assert_eq!(companies, vec!["contoso"]);
}

#[test]
fn cutoff_day_itself_is_retained() {
    let source = tracker(&[["Acme", "Engineer", "Aug 25, 2025", ""]]);

    // 10 days before 2025-09-04 09:30 is 2025-08-25 09:30; midnight of the 25th is older.
    let store = HistoryStore::load(&source, &settings(10), at(2025, 9, 4));
    assert!(store.is_empty());

    let source = tracker(&[["Acme", "Engineer", "Aug 26, 2025", ""]]);
    let store = HistoryStore::load(&source, &settings(10), at(2025, 9, 4));
    assert_eq!(store.len(), 1);
}

#[test]
fn unknown_dates_are_always_retained() {
    let source = tracker(&[
        ["Acme", "Engineer", "sometime last spring", ""],
        ["Globex", "Analyst", "", "Reporting"],
    ]);

    let store = HistoryStore::load(&source, &settings(1), at(2030, 1, 1));

    assert_eq!(store.len(), 2);
    assert!(store.entries().iter().all(|entry| entry.applied_date.is_none()));
}

#[test]
fn ordinal_and_abbreviated_dates_parse() {
    let source = tracker(&[
        ["A", "One", "June 1st, 2025", ""],
        ["B", "Two", "Jul 2nd, 2025", ""],
        ["C", "Three", "July 23rd, 2025", ""],
        ["D", "Four", "2025-07-04", ""],
        ["E", "Five", "2025-07-05 00:00:00", ""],
    ]);

    let store = HistoryStore::load(&source, &settings(365), at(2025, 8, 1));

    let dates: Vec<_> = store.entries().iter().map(|e| e.applied_date).collect();
    assert_eq!(
        dates,
        vec![
            Some(date(2025, 6, 1)),
            Some(date(2025, 7, 2)),
            Some(date(2025, 7, 23)),
            Some(date(2025, 7, 4)),
            Some(date(2025, 7, 5)),
        ]
    );
}

#[test]
fn incomplete_rows_are_dropped_and_keys_normalized() {
    let source = tracker(&[
        ["", "Engineer", "June 1, 2025", ""],
        ["Acme", "   ", "June 1, 2025", ""],
        ["", "", "", ""],
        ["  TD Bank ", " QA Automation Developer", "June 1, 2025", "Selenium suites"],
    ]);

    let store = HistoryStore::load(&source, &settings(90), at(2025, 8, 15));

    assert_eq!(store.len(), 1);
    let entry = &store.entries()[0];
    assert_eq!(entry.company, "td bank");
    assert_eq!(entry.position, "qa automation developer");
    assert_eq!(entry.description, "Selenium suites");
}

#[test]
fn missing_sheet_is_unavailable() {
    let source = MemoryWorkbook::new().with_sheet("Archive", vec![HEADER.to_vec()]);

    let store = HistoryStore::load(&source, &settings(90), at(2025, 8, 15));

    assert_eq!(
        store,
        HistoryStore::Unavailable(UnavailableReason::MissingSheet("Job Tracker".into()))
    );
    assert!(!store.is_available());
    assert!(store.entries().is_empty());
}

#[test]
fn empty_sheet_loads_no_history() {
    let source = MemoryWorkbook::new().with_sheet("Job Tracker", Vec::<Vec<String>>::new());
    let store = HistoryStore::load(&source, &settings(90), at(2025, 8, 15));
    assert_eq!(store, HistoryStore::Loaded(Vec::new()));
}

#[test]
fn header_permutations_resolve_by_name() {
    let header = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();

    let shuffled = ColumnLayout::from_header(&header(&[
        "Job Description",
        " APPLIED DATE ",
        "Position",
        "company",
    ]));
    assert_eq!(shuffled.company, ColumnIndex::Named(3));
    assert_eq!(shuffled.position, ColumnIndex::Named(2));
    assert_eq!(shuffled.applied_date, ColumnIndex::Named(1));
    assert_eq!(shuffled.description, ColumnIndex::Named(0));

    let unnamed = ColumnLayout::from_header(&header(&["Employer", "Role", "When"]));
    assert_eq!(unnamed.company, ColumnIndex::Fallback(0));
    assert_eq!(unnamed.position, ColumnIndex::Fallback(1));
    assert_eq!(unnamed.applied_date, ColumnIndex::Fallback(2));
    assert_eq!(unnamed.description, ColumnIndex::Absent);
}

#[test]
fn shuffled_sheet_loads_through_named_columns() {
    let source = MemoryWorkbook::new().with_sheet(
        "Job Tracker",
        vec![
            vec!["Job Description", "Applied Date", "Position", "Company"],
            vec!["Build pipelines", "June 1, 2025", "Data Engineer", "Initech"],
        ],
    );

    let store = HistoryStore::load(&source, &settings(90), at(2025, 8, 15));

    assert_eq!(store.len(), 1);
    let entry = &store.entries()[0];
    assert_eq!(entry.company, "initech");
    assert_eq!(entry.position, "data engineer");
    assert_eq!(entry.description, "Build pipelines");
    assert_eq!(entry.applied_date, Some(date(2025, 6, 1)));
}

#[test]
fn headerless_columns_fall_back_to_positions() {
    let source = MemoryWorkbook::new().with_sheet(
        "Job Tracker",
        vec![
            vec!["Employer", "Role", "When", "Notes"],
            vec!["Acme", "Engineer", "June 1, 2025", "ignored without a description header"],
        ],
    );

    let store = HistoryStore::load(&source, &settings(90), at(2025, 8, 15));

    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].company, "acme");
    assert_eq!(store.entries()[0].description, "");
}

#[test]
fn maximum_lookback_loads_without_failing() {
    let source = tracker(&[["Acme", "Engineer", "January 5th, 1999", ""]]);

    let store = HistoryStore::load(&source, &settings(u32::MAX), at(2025, 8, 15));

    assert_eq!(store.len(), 1);
}
