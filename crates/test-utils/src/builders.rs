#![allow(dead_code)]

use std::path::PathBuf;

use ploidy_sweep::config::{RawSettings, Settings};
use ploidy_sweep::graph::StageLayout;
use ploidy_sweep::samples::{Sample, SampleFile};

/// Builder for `Sample` to simplify test setup.
pub struct SampleBuilder {
    sample: Sample,
}

impl SampleBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            sample: Sample {
                id: id.to_string(),
                files: Vec::new(),
            },
        }
    }

    pub fn file(mut self, file: &str, synapse_id: &str) -> Self {
        self.sample.files.push(SampleFile {
            file: file.to_string(),
            synapse_id: synapse_id.to_string(),
        });
        self
    }

    /// Add `n` generated files (`<id>_<i>.bam` / `syn<i>`).
    pub fn files(mut self, n: usize) -> Self {
        for i in 0..n {
            let file = format!("{}_{}.bam", self.sample.id, i);
            let syn = format!("syn{}", 1000 + i);
            self = self.file(&file, &syn);
        }
        self
    }

    pub fn build(self) -> Sample {
        self.sample
    }
}

/// Builder for `Settings`.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings::default(),
        }
    }

    pub fn ploidy(mut self, min: u32, max: u32) -> Self {
        self.raw.sweep.ploidy_min = min;
        self.raw.sweep.ploidy_max = max;
        self
    }

    pub fn vmem(mut self, vmem: &str) -> Self {
        self.raw.scheduler.vmem = vmem.to_string();
        self
    }

    pub fn job_home(mut self, path: &str) -> Self {
        self.raw.paths.job_home = Some(PathBuf::from(path));
        self
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Layout with scripts under `/pipe/variant_calling/job_scripts` and the
/// default resource request.
pub fn test_layout() -> StageLayout {
    let settings = SettingsBuilder::new()
        .job_home("/pipe/variant_calling/job_scripts")
        .build();
    StageLayout::from_settings(
        &settings,
        &ploidy_sweep::homes::Homes::from_cmd_home("/pipe/variant_calling"),
    )
}
