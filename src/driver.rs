// src/driver.rs

//! Run driver: one-time preparation, then every sample in turn.

use std::ops::RangeInclusive;
use std::path::Path;

use tracing::info;

use crate::auth::{authenticate, Authenticator};
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::graph::{assemble_sample, StageInvoker, StageLayout};
use crate::homes::Homes;
use crate::run_info;
use crate::samples::Sample;
use crate::scheduler::JobScheduler;

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub samples: usize,
    pub jobs: usize,
}

/// Everything that has to happen once, before the first submission.
///
/// Authentication is skipped when `auth` is `None`.
pub async fn prepare_run<A: Authenticator + ?Sized>(
    auth: Option<&mut A>,
    fs: &dyn FileSystem,
    homes: &Homes,
    config_path: &Path,
    run_info_path: &Path,
) -> Result<()> {
    if let Some(auth) = auth {
        let outcome = authenticate(auth).await?;
        info!(?outcome, "remote data source ready");
    }
    run_info::save(fs, run_info_path, homes, config_path)
}

/// Submit the graph for every sample, in the order given.
///
/// Samples share nothing: per-sample handles are dropped once the
/// candidate-list job is submitted. The first rejected submission stops the
/// run.
pub async fn submit_samples<S: JobScheduler + ?Sized>(
    scheduler: &mut S,
    fs: &dyn FileSystem,
    layout: &StageLayout,
    ploidies: RangeInclusive<u32>,
    samples: &[Sample],
) -> Result<RunSummary> {
    let mut invoker = StageInvoker::new(scheduler, fs, layout);

    for sample in samples {
        println!("{}", sample.id);
        let submission = assemble_sample(&mut invoker, sample, ploidies.clone()).await?;
        info!(
            sample = %submission.sample,
            candidates = %submission.consolidation,
            "sample done"
        );
        println!();
    }

    let summary = RunSummary {
        samples: samples.len(),
        jobs: invoker.submitted(),
    };
    info!(samples = summary.samples, jobs = summary.jobs, "all samples submitted");
    Ok(summary)
}
