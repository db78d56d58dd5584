// src/errors.rs

//! Crate-wide error types.

use thiserror::Error;

/// Why an authentication attempt against the remote data source failed.
///
/// Only [`AuthError::NotAuthenticated`] is recoverable by falling back to an
/// interactive login; every other kind propagates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no cached credentials for the remote data source")]
    NotAuthenticated,

    #[error("network error while authenticating: {0}")]
    Network(String),

    #[error("authentication tool unavailable: {0}")]
    ToolUnavailable(String),

    #[error("authentication failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Sample list error at line {line}: {message}")]
    SampleList { line: usize, message: String },

    #[error("Sample '{0}' has no input files")]
    EmptySample(String),

    #[error("Submission of stage '{stage}' for sample '{sample}' rejected: {message}")]
    Submission {
        stage: String,
        sample: String,
        message: String,
    },

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PipelineError>;
