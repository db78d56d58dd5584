// src/scheduler/mod.rs

//! Batch-scheduler client layer.
//!
//! - [`request`] defines what one submission looks like and how it is
//!   rendered to the scheduler's option/command wire format.
//! - [`backend`] provides the `JobScheduler` trait the graph builder talks to.
//! - [`grid_engine`] is the production client that shells out to `qsub`.
//! - [`recording`] is an in-memory scheduler used for `--dry-run` and tests.

pub mod backend;
pub mod grid_engine;
pub mod recording;
pub mod request;

pub use backend::JobScheduler;
pub use grid_engine::GridEngineScheduler;
pub use recording::{RecordingScheduler, SubmittedJob};
pub use request::{JobRequest, StageCommand, SubmitOptions};
