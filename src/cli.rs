// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `ploidy-sweep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ploidy-sweep",
    version,
    about = "Variant Calling Pipeline: submit per-sample ploidy-sweep job graphs to Grid Engine.",
    long_about = None
)]
pub struct CliArgs {
    /// Sample list (TSV with sample_id, file and synapse_id columns).
    #[arg(value_name = "SAMPLE_LIST")]
    pub sample_list: PathBuf,

    /// Pipeline configuration copied into `run_info`.
    ///
    /// Default: `<pipeline home>/pipeline.conf`.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Orchestrator settings (TOML): scheduler program, memory, ploidy range.
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PLOIDY_SWEEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Build the job graph and print it; submit nothing, write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not log in to Synapse before submitting.
    #[arg(long)]
    pub skip_login: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_and_short_config() {
        let args = CliArgs::try_parse_from(["ploidy-sweep", "samples.tsv", "-c", "my.conf"]).unwrap();
        assert_eq!(args.sample_list, PathBuf::from("samples.tsv"));
        assert_eq!(args.config, Some(PathBuf::from("my.conf")));
        assert!(!args.dry_run);
    }

    #[test]
    fn sample_list_is_required() {
        assert!(CliArgs::try_parse_from(["ploidy-sweep"]).is_err());
    }
}
