use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::PipelineError;

/// Job posting produced by the scraper. Fields the pipeline does not interpret
/// (location, url, easy-apply flag, ...) are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateJob {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(rename = "title", default, deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateJob {
    pub fn new(company: &str, position: &str, description: &str) -> Self {
        Self {
            company: company.to_string(),
            position: position.to_string(),
            description: description.to_string(),
            extra: Map::new(),
        }
    }

    /// Company name safe to use in file and folder names.
    pub fn sanitized_company(&self) -> String {
        sanitize_identifier(&self.company)
    }

    /// Position title safe to use in file and folder names.
    pub fn sanitized_position(&self) -> String {
        sanitize_identifier(&self.position)
    }
}

pub fn sanitize_identifier(value: &str) -> String {
    value.replace('/', "_")
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Load the scraper's JSON array of job postings.
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateJob>, PipelineError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| PipelineError::Jobs {
        path: path.to_path_buf(),
        source,
    })
}
