// src/config/model.rs

use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::Deserialize;

/// Settings as read from a TOML file, before validation.
///
/// ```toml
/// [scheduler]
/// program = "qsub"
/// vmem = "4G"
/// extra_options = ["-r", "y", "-j", "y"]
///
/// [sweep]
/// ploidy_min = 2
/// ploidy_max = 10
///
/// [paths]
/// job_home = "/opt/pipeline/job_scripts"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    pub scheduler: SchedulerSection,

    #[serde(default)]
    pub sweep: SweepSection,

    #[serde(default)]
    pub paths: PathsSection,
}

/// Validated settings. Only obtainable through `TryFrom<RawSettings>`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub scheduler: SchedulerSection,
    pub sweep: SweepSection,
    pub paths: PathsSection,
}

impl Settings {
    pub(crate) fn new_unchecked(
        scheduler: SchedulerSection,
        sweep: SweepSection,
        paths: PathsSection,
    ) -> Self {
        Self {
            scheduler,
            sweep,
            paths,
        }
    }

    /// Ploidy values swept for every sample.
    pub fn ploidy_range(&self) -> RangeInclusive<u32> {
        self.sweep.ploidy_min..=self.sweep.ploidy_max
    }
}

impl Default for Settings {
    fn default() -> Self {
        let raw = RawSettings::default();
        Self::new_unchecked(raw.scheduler, raw.sweep, raw.paths)
    }
}

/// `[scheduler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerSection {
    /// Submission program, looked up on `PATH` unless absolute.
    #[serde(default = "default_program")]
    pub program: String,

    /// Virtual memory requested per task (`-l h_vmem=<vmem>`).
    #[serde(default = "default_vmem")]
    pub vmem: String,

    /// Flags passed verbatim to every submission, before the log directory.
    #[serde(default = "default_extra_options")]
    pub extra_options: Vec<String>,
}

fn default_program() -> String {
    "qsub".to_string()
}

fn default_vmem() -> String {
    "4G".to_string()
}

fn default_extra_options() -> Vec<String> {
    ["-r", "y", "-j", "y"].iter().map(|s| s.to_string()).collect()
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            vmem: default_vmem(),
            extra_options: default_extra_options(),
        }
    }
}

/// `[sweep]` section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SweepSection {
    #[serde(default = "default_ploidy_min")]
    pub ploidy_min: u32,

    #[serde(default = "default_ploidy_max")]
    pub ploidy_max: u32,
}

fn default_ploidy_min() -> u32 {
    2
}

fn default_ploidy_max() -> u32 {
    10
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            ploidy_min: default_ploidy_min(),
            ploidy_max: default_ploidy_max(),
        }
    }
}

/// `[paths]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsSection {
    /// Overrides `<cmd_home>/job_scripts` as the stage script directory.
    #[serde(default)]
    pub job_home: Option<PathBuf>,
}
