// src/graph/assembler.rs

//! Sample pipeline: acquisition, ploidy sweep, consolidation.

use std::ops::RangeInclusive;

use tracing::info;

use crate::errors::{PipelineError, Result};
use crate::graph::invoker::StageInvoker;
use crate::graph::stage::Stage;
use crate::graph::sweep::{self, PloidyBranch};
use crate::samples::Sample;
use crate::scheduler::JobScheduler;
use crate::types::DependencySet;

/// Handles produced while building one sample's graph.
///
/// Returned for logging and inspection only; nothing downstream of the
/// sample consumes them.
#[derive(Debug, Clone)]
pub struct SampleSubmission {
    pub sample: String,
    /// Handle of the structural-variant detection job.
    pub acquisition: DependencySet,
    pub branches: Vec<PloidyBranch>,
    /// Handle of the candidate-list job.
    pub consolidation: DependencySet,
    /// Jobs submitted for this sample.
    pub jobs: usize,
}

/// Submit the full graph for `sample`.
///
/// Any rejected submission aborts immediately; jobs already accepted by the
/// scheduler are left alone.
pub async fn assemble_sample<S: JobScheduler + ?Sized>(
    inv: &mut StageInvoker<'_, S>,
    sample: &Sample,
    ploidies: RangeInclusive<u32>,
) -> Result<SampleSubmission> {
    let before = inv.submitted();

    let acquisition = acquisition(inv, sample).await?;

    let branches = sweep::sweep(inv, &sample.id, ploidies, &acquisition).await?;
    let barrier = sweep::fan_in(branches.clone());

    let consolidation = inv
        .add_stage(Stage::Candidates, &sample.id, None, &barrier)
        .await?;

    let jobs = inv.submitted() - before;
    info!(
        sample = %sample.id,
        jobs,
        branches = branches.len(),
        "sample graph submitted"
    );

    Ok(SampleSubmission {
        sample: sample.id.clone(),
        acquisition,
        branches,
        consolidation,
        jobs,
    })
}

/// Independent downloads, then detection over all of them.
async fn acquisition<S: JobScheduler + ?Sized>(
    inv: &mut StageInvoker<'_, S>,
    sample: &Sample,
) -> Result<DependencySet> {
    if sample.files.is_empty() {
        return Err(PipelineError::EmptySample(sample.id.clone()));
    }

    let mut downloads = DependencySet::new();
    for file in &sample.files {
        let handle = inv.add_download(&sample.id, file).await?;
        downloads = downloads.union(&handle);
    }

    inv.add_stage(Stage::Cnvnator, &sample.id, None, &downloads)
        .await
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::fs::MockFileSystem;
    use crate::graph::invoker::StageLayout;
    use crate::samples::SampleFile;
    use crate::scheduler::RecordingScheduler;

    fn layout() -> StageLayout {
        StageLayout {
            job_home: PathBuf::from("/jobs"),
            log_root: PathBuf::new(),
            vmem: "4G".to_string(),
            extra_options: Vec::new(),
        }
    }

    fn sample(files: usize) -> Sample {
        Sample {
            id: "S1".to_string(),
            files: (0..files)
                .map(|i| SampleFile {
                    file: format!("f{i}.bam"),
                    synapse_id: format!("syn{i}"),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn two_files_give_seventy_six_jobs() {
        let fs = MockFileSystem::new();
        let layout = layout();
        let mut sched = RecordingScheduler::new();
        let mut inv = StageInvoker::new(&mut sched, &fs, &layout);

        let out = assemble_sample(&mut inv, &sample(2), 2..=10).await.unwrap();
        assert_eq!(out.jobs, 76);
        assert_eq!(out.branches.len(), 9);
        assert_eq!(sched.submissions().len(), 76);
    }

    #[tokio::test]
    async fn branches_are_rooted_at_detection() {
        let fs = MockFileSystem::new();
        let layout = layout();
        let mut sched = RecordingScheduler::new();
        let mut inv = StageInvoker::new(&mut sched, &fs, &layout);

        let out = assemble_sample(&mut inv, &sample(1), 2..=3).await.unwrap();
        let roots: Vec<_> = sched
            .submissions()
            .iter()
            .filter(|j| j.request.stage == Stage::HaplotypeCaller)
            .map(|j| j.request.options.hold.clone())
            .collect();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|h| *h == out.acquisition));
    }

    #[tokio::test]
    async fn sample_without_files_submits_nothing() {
        let fs = MockFileSystem::new();
        let layout = layout();
        let mut sched = RecordingScheduler::new();
        let mut inv = StageInvoker::new(&mut sched, &fs, &layout);

        let err = assemble_sample(&mut inv, &sample(0), 2..=10).await;
        assert!(matches!(err, Err(PipelineError::EmptySample(ref id)) if id == "S1"));
        assert!(sched.submissions().is_empty());
    }
}
