// src/plan.rs

//! Dry-run plan: the whole graph built against an in-memory scheduler and
//! written out in an order the scheduler could run it in.

use std::io::Write;

use tracing::debug;

use crate::config::Settings;
use crate::driver::{self, RunSummary};
use crate::errors::Result;
use crate::fs::MockFileSystem;
use crate::graph::{JobGraph, StageLayout};
use crate::samples::Sample;
use crate::scheduler::RecordingScheduler;

/// Build the graph for `samples` and write the plan to `out`.
///
/// Nothing touches the real filesystem: log directories go to a scratch
/// in-memory filesystem and every job gets a made-up id starting at 1.
pub async fn write_plan<W: Write>(
    out: &mut W,
    settings: &Settings,
    layout: &StageLayout,
    samples: &[Sample],
) -> Result<RunSummary> {
    let fs = MockFileSystem::new();
    let mut scheduler = RecordingScheduler::new();
    let summary = driver::submit_samples(
        &mut scheduler,
        &fs,
        layout,
        settings.ploidy_range(),
        samples,
    )
    .await?;

    let submissions = scheduler.into_submissions();
    let graph = JobGraph::from_submissions(&submissions);

    writeln!(out, "ploidy-sweep dry-run")?;
    writeln!(out, "  scheduler.program = {}", settings.scheduler.program)?;
    writeln!(out, "  ploidy range = {:?}", settings.ploidy_range())?;
    writeln!(out, "  job_home = {}", layout.job_home.display())?;
    writeln!(out)?;
    writeln!(out, "jobs ({} for {} samples):", summary.jobs, summary.samples)?;

    for id in graph.topological_order()? {
        let Some(node) = graph.node(id) else { continue };
        let request = &submissions[node.index].request;
        writeln!(out, "  - #{id} {} [{}]", node.stage, node.sample)?;
        writeln!(out, "      options: {}", request.options.render())?;
        writeln!(out, "      cmd: {}", request.command.render())?;
    }

    debug!(jobs = summary.jobs, "dry-run plan written (nothing submitted)");
    Ok(summary)
}
