mod policy;
mod scores;

pub use policy::{Category, CategoryThresholds};
pub use scores::{FitScoreSet, ResumeCategory};

use policy::decide_category;

/// Stateless resolver from fit scores to the resume category to apply with.
///
/// Categories are tried in priority order against their own thresholds. When none
/// qualifies, the best score is used if it reaches the fallback floor; otherwise the
/// job is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryDecision {
    thresholds: CategoryThresholds,
}

impl CategoryDecision {
    pub fn new(thresholds: CategoryThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &CategoryThresholds {
        &self.thresholds
    }

    pub fn decide(&self, scores: &FitScoreSet) -> Category {
        decide_category(scores, &self.thresholds)
    }
}
