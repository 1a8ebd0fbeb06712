use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header row written when a tracker sheet is created.
pub const LOG_HEADER: [&str; 4] = ["Company", "Position", "Applied Date", "Job Description"];

const APPLIED_DATE_FORMAT: &str = "%B %d, %Y";

/// One application to append to the tracker after applying to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLogEntry {
    pub company: String,
    pub position: String,
    pub applied_on: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApplicationLogEntry {
    pub fn applied_date_label(&self) -> String {
        self.applied_on.format(APPLIED_DATE_FORMAT).to_string()
    }

    pub(crate) fn to_record(&self) -> [String; 4] {
        [
            self.company.trim().to_string(),
            self.position.trim().to_string(),
            self.applied_date_label(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}
