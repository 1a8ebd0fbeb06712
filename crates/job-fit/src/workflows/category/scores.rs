use serde::{Deserialize, Serialize};
use std::fmt;

/// Resume variants a job can be routed to, in decision priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeCategory {
    Sde,
    CloudSupport,
    SharepointSupport,
    ApplicationSupport,
}

impl ResumeCategory {
    pub const ALL: [ResumeCategory; 4] = [
        ResumeCategory::Sde,
        ResumeCategory::CloudSupport,
        ResumeCategory::SharepointSupport,
        ResumeCategory::ApplicationSupport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResumeCategory::Sde => "sde",
            ResumeCategory::CloudSupport => "cloud_support",
            ResumeCategory::SharepointSupport => "sharepoint_support",
            ResumeCategory::ApplicationSupport => "application_support",
        }
    }

    /// Key of this category's score in the scorer response.
    pub fn score_key(self) -> &'static str {
        match self {
            ResumeCategory::Sde => "sde_fit",
            ResumeCategory::CloudSupport => "cloud_support_fit",
            ResumeCategory::SharepointSupport => "sharepoint_support_fit",
            ResumeCategory::ApplicationSupport => "application_support_fit",
        }
    }
}

impl fmt::Display for ResumeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fit scores for one job, one per resume category. Nominally 0-100, but any
/// integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FitScoreSet {
    #[serde(rename = "sde_fit")]
    pub sde: i32,
    #[serde(rename = "cloud_support_fit")]
    pub cloud_support: i32,
    #[serde(rename = "sharepoint_support_fit")]
    pub sharepoint_support: i32,
    #[serde(rename = "application_support_fit")]
    pub application_support: i32,
}

impl FitScoreSet {
    pub fn new(
        sde: i32,
        cloud_support: i32,
        sharepoint_support: i32,
        application_support: i32,
    ) -> Self {
        Self {
            sde,
            cloud_support,
            sharepoint_support,
            application_support,
        }
    }

    pub fn score(&self, category: ResumeCategory) -> i32 {
        match category {
            ResumeCategory::Sde => self.sde,
            ResumeCategory::CloudSupport => self.cloud_support,
            ResumeCategory::SharepointSupport => self.sharepoint_support,
            ResumeCategory::ApplicationSupport => self.application_support,
        }
    }

    /// Highest-scoring category; ties go to the category listed first.
    pub fn best(&self) -> (ResumeCategory, i32) {
        let mut best = (ResumeCategory::Sde, self.sde);
        for category in &ResumeCategory::ALL[1..] {
            let score = self.score(*category);
            if score > best.1 {
                best = (*category, score);
            }
        }
        best
    }
}
