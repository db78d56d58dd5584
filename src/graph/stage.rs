// src/graph/stage.rs

//! The fixed catalogue of pipeline stages.
//!
//! Stages are submission templates, not data: each one names a script under
//! the job home, says whether the scheduler should run it as a per-chromosome
//! task array, and says which positional arguments it takes.

use std::fmt;
use std::ops::RangeInclusive;

/// Task indices for per-chromosome array stages (one per chromosome).
pub const CHROMOSOME_TASKS: RangeInclusive<u32> = 1..=24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Fetch one raw input file from the remote data source.
    Download,
    /// Structural-variant / copy-number detection over all downloads.
    Cnvnator,
    /// Per-chromosome genotype likelihoods (GVCF).
    HaplotypeCaller,
    /// Per-chromosome joint genotyping.
    JointGenotyping,
    ConcatVcf,
    /// Variant quality score recalibration.
    Vqsr,
    GermlineFilter,
    /// Allele-frequency annotation.
    VafInfo,
    /// Strand-bias annotation.
    StrandInfo,
    BiasSummary,
    /// Per-sample candidate list over all ploidy branches.
    Candidates,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::Download,
        Stage::Cnvnator,
        Stage::HaplotypeCaller,
        Stage::JointGenotyping,
        Stage::ConcatVcf,
        Stage::Vqsr,
        Stage::GermlineFilter,
        Stage::VafInfo,
        Stage::StrandInfo,
        Stage::BiasSummary,
        Stage::Candidates,
    ];

    /// Script file name under the job home.
    pub fn script(self) -> &'static str {
        match self {
            Stage::Download => "pre_1.download.sh",
            Stage::Cnvnator => "pre_2.cnvnator.sh",
            Stage::HaplotypeCaller => "gatk_1.hc_gvcf.sh",
            Stage::JointGenotyping => "gatk_2.joint_gt.sh",
            Stage::ConcatVcf => "gatk_3.concat_vcf.sh",
            Stage::Vqsr => "gatk_4.vqsr.sh",
            Stage::GermlineFilter => "filter_1.known_germ_filtering.sh",
            Stage::VafInfo => "filter_2-1.vaf_info.sh",
            Stage::StrandInfo => "filter_2-2.strand_info.sh",
            Stage::BiasSummary => "filter_3.bias_summary.sh",
            Stage::Candidates => "post_1.candidates.sh",
        }
    }

    /// Task index range if the stage runs as a scheduler task array.
    pub fn task_array(self) -> Option<RangeInclusive<u32>> {
        match self {
            Stage::HaplotypeCaller | Stage::JointGenotyping => Some(CHROMOSOME_TASKS),
            _ => None,
        }
    }

    /// Whether the ploidy value is passed after the sample id.
    pub fn takes_ploidy(self) -> bool {
        !matches!(self, Stage::Download | Stage::Cnvnator | Stage::Candidates)
    }

    /// Short stable name used in logs and plan output.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Download => "download",
            Stage::Cnvnator => "cnvnator",
            Stage::HaplotypeCaller => "hc_gvcf",
            Stage::JointGenotyping => "joint_gt",
            Stage::ConcatVcf => "concat_vcf",
            Stage::Vqsr => "vqsr",
            Stage::GermlineFilter => "known_germ_filtering",
            Stage::VafInfo => "vaf_info",
            Stage::StrandInfo => "strand_info",
            Stage::BiasSummary => "bias_summary",
            Stage::Candidates => "candidates",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
