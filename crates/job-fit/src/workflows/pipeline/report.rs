use serde::Serialize;

use super::CandidateJob;
use crate::workflows::category::{FitScoreSet, ResumeCategory};
use crate::workflows::dedup::MatchEvidence;

/// Job that cleared the category ladder and was not applied to before.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeptJob {
    pub job: CandidateJob,
    pub category: ResumeCategory,
    pub scores: FitScoreSet,
}

/// Job whose scores fell below every threshold and the fallback floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedJob {
    pub job: CandidateJob,
    pub scores: FitScoreSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateJob {
    pub job: CandidateJob,
    pub category: ResumeCategory,
    pub evidence: MatchEvidence,
}

/// Job the scorer could not produce usable scores for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFailure {
    pub job: CandidateJob,
    pub error: String,
}

/// Outcome of one pipeline run, partitioned by what happened to each job.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FitRun {
    pub kept: Vec<KeptJob>,
    pub skipped: Vec<SkippedJob>,
    pub duplicates: Vec<DuplicateJob>,
    pub failures: Vec<JobFailure>,
    /// Why scoring stopped early, when it did.
    pub halted: Option<String>,
    /// Jobs never scored because the run halted.
    pub unprocessed: usize,
}

impl FitRun {
    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn processed(&self) -> usize {
        self.kept.len() + self.skipped.len() + self.duplicates.len() + self.failures.len()
    }
}
