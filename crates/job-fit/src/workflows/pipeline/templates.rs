use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::PipelineError;
use crate::workflows::category::ResumeCategory;

/// Plain-text resume variant for every resume category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeTemplates {
    texts: BTreeMap<ResumeCategory, String>,
}

impl ResumeTemplates {
    /// Read `<dir>/<category>.txt` for each category. Every file must exist.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, PipelineError> {
        let dir = dir.as_ref();
        let mut texts = BTreeMap::new();
        for category in ResumeCategory::ALL {
            let path = dir.join(format!("{}.txt", category.label()));
            if !path.is_file() {
                return Err(PipelineError::MissingTemplate { category, path });
            }
            let text = fs::read_to_string(&path)
                .map_err(|source| PipelineError::Read { path, source })?;
            texts.insert(category, text.trim().to_string());
        }
        Ok(Self { texts })
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = (ResumeCategory, S)>,
        S: Into<String>,
    {
        Self {
            texts: texts
                .into_iter()
                .map(|(category, text)| (category, text.into()))
                .collect(),
        }
    }

    /// Template text for `category`; empty when it was never provided.
    pub fn text(&self, category: ResumeCategory) -> &str {
        self.texts.get(&category).map(String::as_str).unwrap_or("")
    }
}
