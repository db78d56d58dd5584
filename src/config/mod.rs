// src/config/mod.rs

//! Orchestrator settings.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Validate basic invariants like a non-empty ploidy range (`validate.rs`).
//!
//! This is *not* the pipeline configuration handed to the stage scripts;
//! that file is opaque to the orchestrator and only copied into RunInfo.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_or_default};
pub use model::{PathsSection, RawSettings, SchedulerSection, Settings, SweepSection};
