// src/graph/sweep.rs

//! Ploidy sweep: fan-out from one shared root into one branch per ploidy,
//! then fan-in of the branch outputs.
//!
//! Per ploidy the branch is
//!
//! ```text
//! hc_gvcf[1-24] -> joint_gt[1-24] -> concat_vcf -> vqsr
//!     -> known_germ_filtering -> { vaf_info, strand_info } -> bias_summary
//! ```
//!
//! `vaf_info` and `strand_info` only wait on germline filtering; the bias
//! summary waits on the union of the two.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::errors::Result;
use crate::graph::invoker::StageInvoker;
use crate::graph::stage::Stage;
use crate::scheduler::JobScheduler;
use crate::types::DependencySet;

/// Strictly sequential variant-calling stages.
pub const VARIANT_CALLING: [Stage; 4] = [
    Stage::HaplotypeCaller,
    Stage::JointGenotyping,
    Stage::ConcatVcf,
    Stage::Vqsr,
];

/// One ploidy value and the handle of the last job in its branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PloidyBranch {
    pub ploidy: u32,
    pub handle: DependencySet,
}

/// Variant-calling chain for one ploidy. Returns the recalibration handle.
pub async fn variant_calling<S: JobScheduler + ?Sized>(
    inv: &mut StageInvoker<'_, S>,
    sample: &str,
    ploidy: u32,
    root: &DependencySet,
) -> Result<DependencySet> {
    let mut handle = root.clone();
    for stage in VARIANT_CALLING {
        handle = inv.add_stage(stage, sample, Some(ploidy), &handle).await?;
    }
    Ok(handle)
}

/// Filtering diamond for one ploidy. Returns the bias-summary handle.
pub async fn filtering<S: JobScheduler + ?Sized>(
    inv: &mut StageInvoker<'_, S>,
    sample: &str,
    ploidy: u32,
    after: &DependencySet,
) -> Result<DependencySet> {
    let germline = inv
        .add_stage(Stage::GermlineFilter, sample, Some(ploidy), after)
        .await?;

    let vaf = inv
        .add_stage(Stage::VafInfo, sample, Some(ploidy), &germline)
        .await?;
    let strand = inv
        .add_stage(Stage::StrandInfo, sample, Some(ploidy), &germline)
        .await?;

    inv.add_stage(Stage::BiasSummary, sample, Some(ploidy), &vaf.union(&strand))
        .await
}

/// Build one branch per ploidy, each rooted at `root`.
///
/// Branches are submitted one after the other (variant calling, then
/// filtering, then the next ploidy) but share no dependency with each other.
pub async fn sweep<S: JobScheduler + ?Sized>(
    inv: &mut StageInvoker<'_, S>,
    sample: &str,
    ploidies: RangeInclusive<u32>,
    root: &DependencySet,
) -> Result<Vec<PloidyBranch>> {
    let mut branches = Vec::new();
    for ploidy in ploidies {
        let called = variant_calling(inv, sample, ploidy, root).await?;
        let handle = filtering(inv, sample, ploidy, &called).await?;
        debug!(sample, ploidy, handle = %handle, "ploidy branch submitted");
        branches.push(PloidyBranch { ploidy, handle });
    }
    Ok(branches)
}

/// Fan-in over all branches: one handle waiting on every branch output.
pub fn fan_in(branches: Vec<PloidyBranch>) -> DependencySet {
    branches.into_iter().map(|b| b.handle).collect()
}
