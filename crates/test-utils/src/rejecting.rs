use anyhow::anyhow;
use ploidy_sweep::scheduler::{JobRequest, JobScheduler, RecordingScheduler, SubmittedJob};
use ploidy_sweep::types::{BoxFuture, JobId};

/// A scheduler stub that accepts submissions like `RecordingScheduler` but
/// rejects the `reject_at`-th one (1-based) and every one after it.
pub struct RejectingScheduler {
    inner: RecordingScheduler,
    reject_at: usize,
    attempts: usize,
}

impl RejectingScheduler {
    pub fn new(reject_at: usize) -> Self {
        Self {
            inner: RecordingScheduler::new(),
            reject_at,
            attempts: 0,
        }
    }

    /// Submissions that were accepted.
    pub fn accepted(&self) -> &[SubmittedJob] {
        self.inner.submissions()
    }

    /// Every call to `submit`, accepted or not.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl JobScheduler for RejectingScheduler {
    fn submit<'a>(&'a mut self, request: &'a JobRequest) -> BoxFuture<'a, anyhow::Result<JobId>> {
        self.attempts += 1;
        let result = if self.attempts >= self.reject_at {
            Err(anyhow!("Unable to run job: quota exceeded (attempt {})", self.attempts))
        } else {
            Ok(self.inner.record(request))
        };
        Box::pin(async move { result })
    }
}
