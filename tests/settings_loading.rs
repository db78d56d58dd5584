// tests/settings_loading.rs

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use ploidy_sweep::config::{load_and_validate, load_or_default};
use ploidy_sweep::driver::submit_samples;
use ploidy_sweep::errors::PipelineError;
use ploidy_sweep::fs::MockFileSystem;
use ploidy_sweep::graph::{Stage, StageLayout};
use ploidy_sweep::homes::Homes;
use ploidy_sweep::scheduler::RecordingScheduler;
use ploidy_sweep_test_utils::builders::{SampleBuilder, SettingsBuilder};

#[test]
fn settings_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[scheduler]
program = "/usr/local/sge/bin/qsub"
vmem = "8G"

[sweep]
ploidy_min = 2
ploidy_max = 4

[paths]
job_home = "/shared/job_scripts"
"#
    )
    .unwrap();

    let settings = load_and_validate(file.path()).unwrap();
    assert_eq!(settings.scheduler.program, "/usr/local/sge/bin/qsub");
    assert_eq!(settings.ploidy_range(), 2..=4);

    let layout = StageLayout::from_settings(&settings, &Homes::from_cmd_home("/opt/p/cmd"));
    assert_eq!(layout.job_home, PathBuf::from("/shared/job_scripts"));
    assert_eq!(layout.vmem, "8G");
    // Not overridden: defaults kept.
    assert_eq!(layout.extra_options, vec!["-r", "y", "-j", "y"]);
}

#[test]
fn no_settings_file_means_fixed_sweep() {
    let settings = load_or_default(None).unwrap();
    assert_eq!(settings.ploidy_range(), 2..=10);

    let layout = StageLayout::from_settings(&settings, &Homes::from_cmd_home("/opt/p/cmd"));
    assert_eq!(layout.job_home, PathBuf::from("/opt/p/cmd/job_scripts"));
}

#[test]
fn invalid_range_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[sweep]\nploidy_min = 9\nploidy_max = 3\n").unwrap();

    match load_and_validate(file.path()) {
        Err(PipelineError::ConfigError(msg)) => assert!(msg.contains("ploidy_max")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_returns_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[sweep\nploidy_min = ").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PipelineError::TomlError(_))
    ));
}

#[tokio::test]
async fn narrowed_sweep_and_vmem_reach_every_submission() {
    let settings = SettingsBuilder::new()
        .ploidy(2, 4)
        .vmem("8G")
        .job_home("/shared/job_scripts")
        .build();
    assert_eq!(settings.ploidy_range(), 2..=4);

    let layout = StageLayout::from_settings(&settings, &Homes::from_cmd_home("/opt/p/cmd"));
    let samples = vec![SampleBuilder::new("S1").files(1).build()];
    let mut scheduler = RecordingScheduler::new();
    let summary = submit_samples(
        &mut scheduler,
        &MockFileSystem::new(),
        &layout,
        settings.ploidy_range(),
        &samples,
    )
    .await
    .unwrap();

    // download, cnvnator, three ploidy branches of eight, candidates
    assert_eq!(summary.jobs, 1 + 1 + 3 * 8 + 1);
    let jobs = scheduler.submissions();
    assert!(jobs.iter().all(|j| j.request.options.vmem == "8G"));

    let candidates = jobs.last().unwrap();
    assert_eq!(candidates.request.stage, Stage::Candidates);
    assert_eq!(candidates.request.options.hold.len(), 3);
}
