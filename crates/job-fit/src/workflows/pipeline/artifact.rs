use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{KeptJob, PipelineError};
use crate::workflows::category::{FitScoreSet, ResumeCategory};

/// One kept job as handed to the resume and cover-letter steps.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry<'a> {
    pub id: usize,
    pub job: &'a super::CandidateJob,
    pub job_category: ResumeCategory,
    pub fit_scores: FitScoreSet,
}

/// Number kept jobs sequentially from 1, preserving run order.
pub fn artifact_entries(kept: &[KeptJob]) -> Vec<ArtifactEntry<'_>> {
    kept.iter()
        .enumerate()
        .map(|(index, kept)| ArtifactEntry {
            id: index + 1,
            job: &kept.job,
            job_category: kept.category,
            fit_scores: kept.scores,
        })
        .collect()
}

pub fn write_artifact<P: AsRef<Path>>(path: P, kept: &[KeptJob]) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let artifact_error = |source| PipelineError::Artifact {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(artifact_error)?;
    }
    let file = File::create(path).map_err(artifact_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &artifact_entries(kept))?;
    writer.write_all(b"\n").map_err(artifact_error)?;
    writer.flush().map_err(artifact_error)?;
    Ok(())
}
