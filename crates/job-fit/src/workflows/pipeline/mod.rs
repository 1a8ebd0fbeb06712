mod artifact;
mod candidate;
mod gemini;
mod keyring;
mod report;
mod scorer;
mod templates;

pub use artifact::{artifact_entries, write_artifact, ArtifactEntry};
pub use candidate::{load_candidates, sanitize_identifier, CandidateJob};
pub use gemini::{build_prompt, classify_failure, GeminiScorer};
pub use keyring::{KeyFailure, KeyRing, RotationError};
pub use report::{DuplicateJob, FitRun, JobFailure, KeptJob, SkippedJob};
pub use scorer::{parse_fit_scores, FitScorer, ScoreParseError, ScorerError};
pub use templates::ResumeTemplates;

use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::category::{Category, CategoryDecision, ResumeCategory};
use super::dedup::DeduplicationEngine;
use super::similarity::SimilarityMatcher;

/// Scores, classifies and deduplicates a batch of scraped jobs.
pub struct FitPipeline<'a, M> {
    dedup: &'a DeduplicationEngine<M>,
    decision: CategoryDecision,
}

impl<'a, M: SimilarityMatcher> FitPipeline<'a, M> {
    pub fn new(dedup: &'a DeduplicationEngine<M>, decision: CategoryDecision) -> Self {
        Self { dedup, decision }
    }

    /// Run every job through scorer, category decision and dedup, in order.
    ///
    /// A malformed or rejected score fails only that job. An unavailable scorer stops
    /// the run; later jobs are counted as unprocessed and never guessed at.
    pub fn run<S>(&self, scorer: &mut S, jobs: Vec<CandidateJob>) -> FitRun
    where
        S: FitScorer + ?Sized,
    {
        let total = jobs.len();
        let mut run = FitRun::default();
        let mut jobs = jobs.into_iter();

        while let Some(job) = jobs.next() {
            let response = match scorer.score(&job) {
                Ok(response) => response,
                Err(ScorerError::Unavailable(reason)) => {
                    warn!(company = %job.company, position = %job.position, %reason, "scorer unavailable, halting run");
                    run.unprocessed = 1 + jobs.len();
                    run.halted = Some(reason);
                    break;
                }
                Err(err) => {
                    warn!(company = %job.company, position = %job.position, error = %err, "scoring failed");
                    run.failures.push(JobFailure {
                        job,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let scores = match parse_fit_scores(&response) {
                Ok(scores) => scores,
                Err(err) => {
                    warn!(company = %job.company, position = %job.position, error = %err, "discarding malformed fit scores");
                    run.failures.push(JobFailure {
                        job,
                        error: err.to_string(),
                    });
                    continue;
                }
            };

            let category = match self.decision.decide(&scores) {
                Category::Resume(category) => category,
                Category::Skip => {
                    debug!(company = %job.company, position = %job.position, ?scores, "below every threshold");
                    run.skipped.push(SkippedJob { job, scores });
                    continue;
                }
            };

            if let Some(found) = self
                .dedup
                .find_match(&job.company, &job.position, &job.description)
            {
                info!(company = %job.company, position = %job.position, %category, "already applied, dropping");
                let evidence = found.evidence;
                run.duplicates.push(DuplicateJob {
                    job,
                    category,
                    evidence,
                });
                continue;
            }

            debug!(company = %job.company, position = %job.position, %category, "keeping job");
            run.kept.push(KeptJob {
                job,
                category,
                scores,
            });
        }

        info!(
            total,
            kept = run.kept.len(),
            skipped = run.skipped.len(),
            duplicates = run.duplicates.len(),
            failures = run.failures.len(),
            unprocessed = run.unprocessed,
            halted = run.is_halted(),
            "fit pipeline finished"
        );
        run
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid job list in {}: {source}", path.display())]
    Jobs {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing resume template for {category}: {}", path.display())]
    MissingTemplate {
        category: ResumeCategory,
        path: PathBuf,
    },
    #[error("failed to write artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
