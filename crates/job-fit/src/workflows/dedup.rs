use chrono::NaiveDateTime;
use serde::Serialize;

use super::similarity::{SimilarityMatcher, TokenSetMatcher};
use super::tracker::{normalize_key, HistoryEntry, HistoryStore, TrackerSettings, TrackerSource};

/// Only the opening of a posting is compared; re-hosted listings agree most there.
pub const DESCRIPTION_SNIPPET_CHARS: usize = 800;

/// First [`DESCRIPTION_SNIPPET_CHARS`] characters of `text`.
pub fn snippet(text: &str) -> &str {
    match text.char_indices().nth(DESCRIPTION_SNIPPET_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// How a history entry was recognized as the same job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvidence {
    /// Same company and position, and one side had no description to compare.
    CompanyAndPosition,
    /// Same company and position with descriptions at or above the threshold.
    SimilarDescription { score: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMatch<'a> {
    pub entry: &'a HistoryEntry,
    pub evidence: MatchEvidence,
}

/// Decides whether a scraped job was already applied to.
#[derive(Debug, Clone)]
pub struct DeduplicationEngine<M = TokenSetMatcher> {
    history: HistoryStore,
    matcher: M,
    similarity_threshold: u8,
}

impl DeduplicationEngine<TokenSetMatcher> {
    pub fn new(history: HistoryStore, similarity_threshold: u8) -> Self {
        Self::with_matcher(history, TokenSetMatcher, similarity_threshold)
    }

    /// Load the tracker window ending at `now` and build an engine over it.
    pub fn from_source<S>(source: &S, settings: &TrackerSettings, now: NaiveDateTime) -> Self
    where
        S: TrackerSource + ?Sized,
    {
        let history = HistoryStore::load(source, settings, now);
        Self::new(history, settings.similarity_threshold)
    }
}

impl<M: SimilarityMatcher> DeduplicationEngine<M> {
    pub fn with_matcher(history: HistoryStore, matcher: M, similarity_threshold: u8) -> Self {
        Self {
            history,
            matcher,
            similarity_threshold,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn similarity_threshold(&self) -> u8 {
        self.similarity_threshold
    }

    /// First history entry that counts as the same job, if any.
    pub fn find_match(
        &self,
        company: &str,
        position: &str,
        description: &str,
    ) -> Option<AppliedMatch<'_>> {
        let entries = match &self.history {
            HistoryStore::Loaded(entries) if !entries.is_empty() => entries,
            _ => return None,
        };

        let company_key = normalize_key(company);
        let position_key = normalize_key(position);
        let candidate = snippet(description);

        for entry in entries {
            if entry.company != company_key || entry.position != position_key {
                continue;
            }

            if candidate.is_empty() || entry.description.is_empty() {
                return Some(AppliedMatch {
                    entry,
                    evidence: MatchEvidence::CompanyAndPosition,
                });
            }

            let score = self.matcher.score(candidate, snippet(&entry.description));
            if score >= self.similarity_threshold {
                return Some(AppliedMatch {
                    entry,
                    evidence: MatchEvidence::SimilarDescription { score },
                });
            }
        }

        None
    }

    pub fn is_applied(&self, company: &str, position: &str, description: &str) -> bool {
        self.find_match(company, position, description).is_some()
    }
}
