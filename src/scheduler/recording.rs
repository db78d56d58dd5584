// src/scheduler/recording.rs

//! In-memory scheduler that hands out sequential job ids and remembers every
//! request. Used for `--dry-run` and as the base of test stubs.

use anyhow::Result;

use crate::scheduler::backend::JobScheduler;
use crate::scheduler::request::JobRequest;
use crate::types::{BoxFuture, JobId};

/// A request together with the id it was given.
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub id: JobId,
    pub request: JobRequest,
}

#[derive(Debug, Clone)]
pub struct RecordingScheduler {
    next_id: u64,
    submitted: Vec<SubmittedJob>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start numbering at `first_id`, e.g. to check that two runs with
    /// different ids still produce the same topology.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            next_id: first_id,
            submitted: Vec::new(),
        }
    }

    /// Every accepted submission, in submission order.
    pub fn submissions(&self) -> &[SubmittedJob] {
        &self.submitted
    }

    pub fn into_submissions(self) -> Vec<SubmittedJob> {
        self.submitted
    }

    /// Accept `request` synchronously. Exposed so wrapping stubs can reuse it.
    pub fn record(&mut self, request: &JobRequest) -> JobId {
        let id = JobId(self.next_id);
        self.next_id += 1;
        self.submitted.push(SubmittedJob {
            id,
            request: request.clone(),
        });
        id
    }
}

impl Default for RecordingScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl JobScheduler for RecordingScheduler {
    fn submit<'a>(&'a mut self, request: &'a JobRequest) -> BoxFuture<'a, Result<JobId>> {
        let id = self.record(request);
        Box::pin(async move { Ok(id) })
    }
}
