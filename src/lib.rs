// src/lib.rs

pub mod auth;
pub mod cli;
pub mod config;
pub mod driver;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod homes;
pub mod logging;
pub mod plan;
pub mod run_info;
pub mod samples;
pub mod scheduler;
pub mod types;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::auth::SynapseCli;
use crate::cli::CliArgs;
use crate::config::Settings;
use crate::fs::RealFileSystem;
use crate::graph::StageLayout;
use crate::homes::Homes;
use crate::samples::Sample;
use crate::scheduler::GridEngineScheduler;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings and install-relative homes
/// - sample-list parsing (fails before anything is submitted)
/// - authentication and RunInfo
/// - the Grid Engine client and the per-sample graph builder
pub async fn run(args: CliArgs) -> Result<()> {
    let homes = Homes::discover()?;
    let settings = config::load_or_default(args.settings.as_deref())?;
    let layout = StageLayout::from_settings(&settings, &homes);

    let fs = RealFileSystem;
    let samples = samples::load_sample_list(&fs, &args.sample_list)?;
    info!(
        samples = samples.len(),
        ploidies = ?settings.ploidy_range(),
        "sample list loaded"
    );

    if args.dry_run {
        return dry_run(&settings, &layout, &samples).await;
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| homes.default_config_path());
    let run_info_path = Path::new(run_info::RUN_INFO_FILE);

    let mut synapse = SynapseCli::default();
    let auth = if args.skip_login {
        None
    } else {
        Some(&mut synapse)
    };
    driver::prepare_run(auth, &fs, &homes, &config_path, run_info_path).await?;

    let mut scheduler = GridEngineScheduler::new(settings.scheduler.program.clone());
    driver::submit_samples(
        &mut scheduler,
        &fs,
        &layout,
        settings.ploidy_range(),
        &samples,
    )
    .await?;

    Ok(())
}

/// Print the plan to stdout instead of submitting anything.
async fn dry_run(settings: &Settings, layout: &StageLayout, samples: &[Sample]) -> Result<()> {
    let mut out = std::io::stdout();
    plan::write_plan(&mut out, settings, layout, samples).await?;
    debug!("dry-run complete (nothing submitted)");
    Ok(())
}
