use chrono::{Local, NaiveDate, NaiveDateTime};
use job_fit::config::{AppConfig, TrackerConfig};
use job_fit::error::AppError;
use job_fit::telemetry;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Load configuration and install the log subscriber.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Apply command-line tracker overrides on top of the configured tracker.
pub(crate) fn tracker_config(
    mut tracker: TrackerConfig,
    directory: Option<PathBuf>,
    sheet: Option<String>,
) -> TrackerConfig {
    if let Some(directory) = directory {
        tracker.directory = directory;
    }
    if let Some(sheet) = sheet {
        tracker.settings.sheet_name = sheet;
    }
    tracker
}

/// Instant the lookback window ends at: the start of `today` when given, else now.
pub(crate) fn reference_time(today: Option<NaiveDate>) -> NaiveDateTime {
    match today {
        Some(day) => day.and_time(chrono::NaiveTime::MIN),
        None => Local::now().naive_local(),
    }
}

/// Description text from `--description` or `--description-file`, whichever is set.
pub(crate) fn read_description(
    inline: Option<String>,
    file: Option<&Path>,
) -> Result<Option<String>, AppError> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => Ok(Some(fs::read_to_string(path)?)),
        (None, None) => Ok(None),
    }
}
