use ploidy_sweep::driver::{submit_samples, RunSummary};
use ploidy_sweep::fs::MockFileSystem;
use ploidy_sweep::graph::JobGraph;
use ploidy_sweep::samples::Sample;
use ploidy_sweep::scheduler::{RecordingScheduler, SubmittedJob};
use ploidy_sweep_test_utils::builders::test_layout;

/// Submit `samples` against a recording scheduler whose ids start at
/// `first_id`, sweeping ploidy 2..=10.
#[allow(dead_code)]
pub async fn build_run(samples: &[Sample], first_id: u64) -> (RunSummary, Vec<SubmittedJob>) {
    let fs = MockFileSystem::new();
    let layout = test_layout();
    let mut scheduler = RecordingScheduler::starting_at(first_id);
    let summary = submit_samples(&mut scheduler, &fs, &layout, 2..=10, samples)
        .await
        .expect("recording scheduler never rejects");
    (summary, scheduler.into_submissions())
}

#[allow(dead_code)]
pub async fn build_graph(samples: &[Sample]) -> JobGraph {
    let (_, jobs) = build_run(samples, 1).await;
    JobGraph::from_submissions(&jobs)
}
