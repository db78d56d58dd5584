// src/graph/invoker.rs

//! Stage invoker: the `add_stage(predecessors) -> handle` primitive every
//! other part of the builder is made of.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::debug;

use crate::config::Settings;
use crate::errors::{PipelineError, Result};
use crate::fs::FileSystem;
use crate::graph::stage::Stage;
use crate::homes::Homes;
use crate::samples::SampleFile;
use crate::scheduler::{JobRequest, JobScheduler, StageCommand, SubmitOptions};
use crate::types::DependencySet;

/// Where stage scripts live, where their logs go, and the fixed resource
/// request attached to every job.
#[derive(Debug, Clone)]
pub struct StageLayout {
    pub job_home: PathBuf,
    /// Per-sample log directories are `<log_root>/<sample>/logs`.
    pub log_root: PathBuf,
    pub vmem: String,
    pub extra_options: Vec<String>,
}

impl StageLayout {
    pub fn from_settings(settings: &Settings, homes: &Homes) -> Self {
        Self {
            job_home: settings
                .paths
                .job_home
                .clone()
                .unwrap_or_else(|| homes.job_home.clone()),
            log_root: PathBuf::new(),
            vmem: settings.scheduler.vmem.clone(),
            extra_options: settings.scheduler.extra_options.clone(),
        }
    }

    pub fn log_dir(&self, sample: &str) -> PathBuf {
        self.log_root.join(sample).join("logs")
    }

    pub fn script_path(&self, stage: Stage) -> PathBuf {
        self.job_home.join(stage.script())
    }
}

/// Submits stages against an explicitly supplied scheduler.
///
/// Holds no job state of its own beyond a submission counter; the returned
/// handles are the only thing callers thread forward.
pub struct StageInvoker<'a, S: JobScheduler + ?Sized> {
    scheduler: &'a mut S,
    fs: &'a dyn FileSystem,
    layout: &'a StageLayout,
    submitted: usize,
}

impl<'a, S: JobScheduler + ?Sized> StageInvoker<'a, S> {
    pub fn new(scheduler: &'a mut S, fs: &'a dyn FileSystem, layout: &'a StageLayout) -> Self {
        Self {
            scheduler,
            fs,
            layout,
            submitted: 0,
        }
    }

    /// Number of jobs this invoker has registered.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Submit `stage` for `sample` (and `ploidy`, for per-ploidy stages),
    /// held until every job in `predecessors` has finished.
    pub async fn add_stage(
        &mut self,
        stage: Stage,
        sample: &str,
        ploidy: Option<u32>,
        predecessors: &DependencySet,
    ) -> Result<DependencySet> {
        let mut args = vec![sample.to_string()];
        match (stage.takes_ploidy(), ploidy) {
            (true, Some(p)) => args.push(p.to_string()),
            (false, None) if stage != Stage::Download => {}
            _ => {
                return Err(PipelineError::Other(anyhow!(
                    "invalid arguments for stage '{}' (ploidy: {:?})",
                    stage,
                    ploidy
                )));
            }
        }
        self.submit(stage, sample, ploidy, args, predecessors).await
    }

    /// Submit one download job. Downloads never wait on anything.
    pub async fn add_download(&mut self, sample: &str, file: &SampleFile) -> Result<DependencySet> {
        let args = vec![
            sample.to_string(),
            file.file.clone(),
            file.synapse_id.clone(),
        ];
        self.submit(Stage::Download, sample, None, args, &DependencySet::new())
            .await
    }

    async fn submit(
        &mut self,
        stage: Stage,
        sample: &str,
        ploidy: Option<u32>,
        args: Vec<String>,
        predecessors: &DependencySet,
    ) -> Result<DependencySet> {
        let log_dir = self.layout.log_dir(sample);
        ensure_log_dir(self.fs, &log_dir)?;

        let request = JobRequest {
            stage,
            sample: sample.to_string(),
            ploidy,
            options: SubmitOptions {
                task_array: stage.task_array(),
                hold: predecessors.clone(),
                extra: self.layout.extra_options.clone(),
                log_dir,
                vmem: self.layout.vmem.clone(),
            },
            command: StageCommand {
                script: self.layout.script_path(stage),
                args,
            },
        };

        let id = self
            .scheduler
            .submit(&request)
            .await
            .map_err(|err| PipelineError::Submission {
                stage: stage.label().to_string(),
                sample: sample.to_string(),
                message: format!("{err:#}"),
            })?;
        self.submitted += 1;

        debug!(
            stage = %stage,
            sample,
            ploidy = ?ploidy,
            job = %id,
            hold = %predecessors,
            "submitted stage"
        );

        Ok(DependencySet::single(id))
    }
}

fn ensure_log_dir(fs: &dyn FileSystem, dir: &Path) -> Result<()> {
    fs.create_dir_all(dir)?;
    Ok(())
}
