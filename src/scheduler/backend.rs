// src/scheduler/backend.rs

//! Pluggable scheduler abstraction.
//!
//! The graph builder talks to a `JobScheduler` instead of a process-wide
//! queue object. Production code uses [`super::GridEngineScheduler`]; dry runs
//! and tests use [`super::RecordingScheduler`] or their own implementation.

use anyhow::Result;

use crate::scheduler::request::JobRequest;
use crate::types::{BoxFuture, JobId};

/// Trait abstracting how a single job is handed to the batch scheduler.
pub trait JobScheduler: Send {
    /// Register exactly one job and return the identifier the scheduler
    /// assigned to it.
    ///
    /// An `Err` means the scheduler rejected the submission; callers treat
    /// it as fatal for the whole run.
    fn submit<'a>(&'a mut self, request: &'a JobRequest) -> BoxFuture<'a, Result<JobId>>;
}
