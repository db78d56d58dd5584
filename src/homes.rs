// src/homes.rs

//! Install-relative directories.
//!
//! The binary lives in `<pipe_home>/<cmd_dir>/`; stage scripts sit next to it
//! in `job_scripts/`, shared helpers in `<pipe_home>/analysis_utils`, and the
//! default pipeline configuration at `<pipe_home>/pipeline.conf`.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homes {
    pub cmd_home: PathBuf,
    pub pipe_home: PathBuf,
    pub util_home: PathBuf,
    pub job_home: PathBuf,
}

impl Homes {
    /// Derive every home from the directory holding the executable.
    pub fn from_cmd_home(cmd_home: impl Into<PathBuf>) -> Self {
        let cmd_home = cmd_home.into();
        let pipe_home = cmd_home
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cmd_home.clone());
        Self {
            util_home: pipe_home.join("analysis_utils"),
            job_home: cmd_home.join("job_scripts"),
            pipe_home,
            cmd_home,
        }
    }

    /// Resolve from the running executable's real location.
    pub fn discover() -> Result<Self> {
        let exe = std::env::current_exe().context("locating the running executable")?;
        let exe = exe
            .canonicalize()
            .with_context(|| format!("resolving {:?}", exe))?;
        let cmd_home = exe
            .parent()
            .map(Path::to_path_buf)
            .context("executable has no parent directory")?;
        Ok(Self::from_cmd_home(cmd_home))
    }

    pub fn default_config_path(&self) -> PathBuf {
        self.pipe_home.join("pipeline.conf")
    }
}
