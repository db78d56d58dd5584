// src/run_info.rs

//! RunInfo: resolved homes plus the verbatim pipeline configuration, written
//! once before anything is submitted. Stage scripts read it; the
//! orchestrator never does.

use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::homes::Homes;

/// File name, relative to the working directory.
pub const RUN_INFO_FILE: &str = "run_info";

pub fn render(homes: &Homes, config: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("CMD_HOME={}\n", homes.cmd_home.display()));
    out.push_str(&format!("UTIL_HOME={}\n\n", homes.util_home.display()));
    out.push_str(config);
    out
}

/// Read `config_path` and write RunInfo to `target`.
pub fn save(fs: &dyn FileSystem, target: &Path, homes: &Homes, config_path: &Path) -> Result<()> {
    let config = fs.read_to_string(config_path)?;
    fs.write(target, render(homes, &config).as_bytes())?;
    info!(path = ?target, config = ?config_path, "run info written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    #[test]
    fn writes_homes_then_config_verbatim() {
        let fs = MockFileSystem::new();
        fs.add_file("/opt/pipe/pipeline.conf", "REF=/ref/hg19.fa\nGATK=/tools/gatk\n");
        let homes = Homes::from_cmd_home("/opt/pipe/variant_calling");

        save(
            &fs,
            Path::new(RUN_INFO_FILE),
            &homes,
            Path::new("/opt/pipe/pipeline.conf"),
        )
        .unwrap();

        assert_eq!(
            fs.file_contents(RUN_INFO_FILE).unwrap(),
            "CMD_HOME=/opt/pipe/variant_calling\n\
             UTIL_HOME=/opt/pipe/analysis_utils\n\
             \n\
             REF=/ref/hg19.fa\nGATK=/tools/gatk\n"
        );
    }

    #[test]
    fn missing_config_writes_nothing() {
        let fs = MockFileSystem::new();
        let homes = Homes::from_cmd_home("/x/y");
        assert!(save(&fs, Path::new(RUN_INFO_FILE), &homes, Path::new("/nope")).is_err());
        assert!(fs.file_contents(RUN_INFO_FILE).is_none());
    }
}
