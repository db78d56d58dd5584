// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{PipelineError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = PipelineError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw.scheduler, raw.sweep, raw.paths))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_scheduler(raw)?;
    validate_sweep(raw)?;
    Ok(())
}

fn validate_scheduler(raw: &RawSettings) -> Result<()> {
    if raw.scheduler.program.trim().is_empty() {
        return Err(PipelineError::ConfigError(
            "[scheduler].program must not be empty".to_string(),
        ));
    }
    if raw.scheduler.vmem.trim().is_empty() {
        return Err(PipelineError::ConfigError(
            "[scheduler].vmem must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_sweep(raw: &RawSettings) -> Result<()> {
    let sweep = raw.sweep;
    if sweep.ploidy_min == 0 {
        return Err(PipelineError::ConfigError(
            "[sweep].ploidy_min must be >= 1 (got 0)".to_string(),
        ));
    }
    if sweep.ploidy_min > sweep.ploidy_max {
        return Err(PipelineError::ConfigError(format!(
            "[sweep].ploidy_min ({}) must not exceed ploidy_max ({})",
            sweep.ploidy_min, sweep.ploidy_max
        )));
    }
    Ok(())
}
