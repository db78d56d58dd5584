// src/scheduler/grid_engine.rs

//! Grid Engine client: one `qsub` process per submission.

use std::process::Stdio;
use std::sync::LazyLock;

use anyhow::{anyhow, bail, Context, Result};
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::scheduler::backend::JobScheduler;
use crate::scheduler::request::JobRequest;
use crate::types::{BoxFuture, JobId};

// `Your job 123 ("x") has been submitted` / `Your job-array 123.1-24:1 ("x") ...`
static VERBOSE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Your job(?:-array)? (\d+)").expect("static regex is valid")
});

// `qsub -terse`: `123` or `123.1-24:1`
static TERSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)(?:\.\S+)?\s*$").expect("static regex is valid"));

/// Production scheduler client.
#[derive(Debug, Clone)]
pub struct GridEngineScheduler {
    program: String,
}

impl GridEngineScheduler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn submit_inner(&self, request: &JobRequest) -> Result<JobId> {
        let mut cmd = Command::new(&self.program);
        cmd.args(request.options.to_args())
            .arg(&request.command.script)
            .args(&request.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(
            program = %self.program,
            options = %request.options.render(),
            command = %request.command.render(),
            "invoking scheduler"
        );

        let output = cmd
            .output()
            .await
            .with_context(|| format!("running '{}'", self.program))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            bail!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }
        if !stderr.trim().is_empty() {
            warn!(stderr = %stderr.trim(), "scheduler wrote to stderr");
        }

        parse_job_id(&stdout)
            .ok_or_else(|| anyhow!("could not find a job id in scheduler output: {:?}", stdout.trim()))
    }
}

impl JobScheduler for GridEngineScheduler {
    fn submit<'a>(&'a mut self, request: &'a JobRequest) -> BoxFuture<'a, Result<JobId>> {
        Box::pin(self.submit_inner(request))
    }
}

/// Extract the job number from `qsub` output (verbose or `-terse`).
pub fn parse_job_id(output: &str) -> Option<JobId> {
    let caps = VERBOSE_ID.captures(output).or_else(|| {
        output
            .lines()
            .find_map(|line| TERSE_ID.captures(line))
    })?;
    caps.get(1)?.as_str().parse().ok()
}
