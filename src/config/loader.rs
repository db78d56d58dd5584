// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load a settings file and return the raw, unvalidated `RawSettings`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let contents = fs::read_to_string(path.as_ref())?;
    let raw: RawSettings = toml::from_str(&contents)?;
    Ok(raw)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}

/// Settings from `path` when given, built-in defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(p) => load_and_validate(p),
        None => Ok(Settings::default()),
    }
}
