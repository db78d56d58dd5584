// src/graph/mod.rs

//! Per-sample job-graph construction.
//!
//! - [`stage`] is the catalogue of pipeline stages.
//! - [`invoker`] submits one stage and returns its dependency handle.
//! - [`sweep`] builds the per-ploidy variant-calling chain and filtering
//!   diamond, and folds the branch outputs into one handle.
//! - [`assembler`] sequences acquisition, sweep and consolidation for a sample.
//! - [`topology`] rebuilds the submitted graph from recorded requests, for
//!   dry-run output and shape checks.

pub mod assembler;
pub mod invoker;
pub mod stage;
pub mod sweep;
pub mod topology;

pub use assembler::{assemble_sample, SampleSubmission};
pub use invoker::{StageInvoker, StageLayout};
pub use stage::{Stage, CHROMOSOME_TASKS};
pub use sweep::PloidyBranch;
pub use topology::JobGraph;
