use super::candidate::CandidateJob;
use crate::workflows::category::FitScoreSet;

/// Source of raw fit-score responses for a job posting.
pub trait FitScorer {
    /// Return the scorer's raw text answer for `job`; parsing happens in the
    /// pipeline so every scorer is held to the same response contract.
    fn score(&mut self, job: &CandidateJob) -> Result<String, ScorerError>;
}

/// Scorer failure classes. `Unavailable` stops the whole run; `Rejected` fails
/// only the job being scored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScorerError {
    #[error("scorer unavailable: {0}")]
    Unavailable(String),
    #[error("scorer rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
#[error("malformed fit scores ({source}) in response: {excerpt}")]
pub struct ScoreParseError {
    pub excerpt: String,
    #[source]
    pub source: serde_json::Error,
}

const EXCERPT_CHARS: usize = 200;

/// Parse the scorer's JSON answer, tolerating a surrounding Markdown code fence.
pub fn parse_fit_scores(response: &str) -> Result<FitScoreSet, ScoreParseError> {
    let body = strip_code_fence(response);
    serde_json::from_str(body).map_err(|source| ScoreParseError {
        excerpt: body.chars().take(EXCERPT_CHARS).collect(),
        source,
    })
}

fn strip_code_fence(response: &str) -> &str {
    let mut body = response.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}
