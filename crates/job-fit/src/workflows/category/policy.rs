use super::scores::{FitScoreSet, ResumeCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-category acceptance thresholds plus the floor for the best-score fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub sde: i32,
    pub cloud_support: i32,
    pub sharepoint_support: i32,
    pub application_support: i32,
    pub fallback_floor: i32,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            sde: 82,
            cloud_support: 75,
            sharepoint_support: 70,
            application_support: 75,
            fallback_floor: 71,
        }
    }
}

impl CategoryThresholds {
    pub fn threshold(&self, category: ResumeCategory) -> i32 {
        match category {
            ResumeCategory::Sde => self.sde,
            ResumeCategory::CloudSupport => self.cloud_support,
            ResumeCategory::SharepointSupport => self.sharepoint_support,
            ResumeCategory::ApplicationSupport => self.application_support,
        }
    }
}

/// Outcome of the category decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Resume(ResumeCategory),
    Skip,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Resume(category) => category.label(),
            Category::Skip => "skip",
        }
    }

    pub fn resume(self) -> Option<ResumeCategory> {
        match self {
            Category::Resume(category) => Some(category),
            Category::Skip => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub(crate) fn decide_category(scores: &FitScoreSet, thresholds: &CategoryThresholds) -> Category {
    for category in ResumeCategory::ALL {
        if scores.score(category) >= thresholds.threshold(category) {
            return Category::Resume(category);
        }
    }

    let (best, score) = scores.best();
    if score < thresholds.fallback_floor {
        return Category::Skip;
    }

    Category::Resume(best)
}
