// src/scheduler/request.rs

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::graph::Stage;
use crate::types::DependencySet;

/// Scheduler options for one submission.
///
/// Rendered in Grid Engine syntax:
/// `[-t 1-24] [-hold_jid 1,2] <extra...> -o <log_dir> -l h_vmem=<vmem>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOptions {
    pub task_array: Option<RangeInclusive<u32>>,
    pub hold: DependencySet,
    pub extra: Vec<String>,
    pub log_dir: PathBuf,
    pub vmem: String,
}

impl SubmitOptions {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(range) = &self.task_array {
            args.push("-t".to_string());
            args.push(format!("{}-{}", range.start(), range.end()));
        }
        if let Some(hold) = self.hold.to_hold_arg() {
            args.push("-hold_jid".to_string());
            args.push(hold);
        }
        args.extend(self.extra.iter().cloned());
        args.push("-o".to_string());
        args.push(self.log_dir.display().to_string());
        args.push("-l".to_string());
        args.push(format!("h_vmem={}", self.vmem));
        args
    }

    /// The option string as a single line, for logs and plan output.
    pub fn render(&self) -> String {
        self.to_args().join(" ")
    }
}

/// Stage script plus positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCommand {
    pub script: PathBuf,
    pub args: Vec<String>,
}

impl StageCommand {
    pub fn render(&self) -> String {
        let mut parts = vec![self.script.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// One job submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub stage: Stage,
    pub sample: String,
    pub ploidy: Option<u32>,
    pub options: SubmitOptions,
    pub command: StageCommand,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobId;

    fn options() -> SubmitOptions {
        SubmitOptions {
            task_array: None,
            hold: DependencySet::new(),
            extra: vec!["-r".into(), "y".into(), "-j".into(), "y".into()],
            log_dir: PathBuf::from("S1/logs"),
            vmem: "4G".into(),
        }
    }

    #[test]
    fn root_job_has_no_hold() {
        assert_eq!(options().render(), "-r y -j y -o S1/logs -l h_vmem=4G");
    }

    #[test]
    fn array_and_hold_come_first() {
        let mut opts = options();
        opts.task_array = Some(1..=24);
        opts.hold = [JobId(11), JobId(10)].into_iter().collect();
        assert_eq!(
            opts.render(),
            "-t 1-24 -hold_jid 10,11 -r y -j y -o S1/logs -l h_vmem=4G"
        );
    }

    #[test]
    fn command_renders_script_then_args() {
        let cmd = StageCommand {
            script: PathBuf::from("/opt/job_scripts/gatk_4.vqsr.sh"),
            args: vec!["S1".into(), "3".into()],
        };
        assert_eq!(cmd.render(), "/opt/job_scripts/gatk_4.vqsr.sh S1 3");
    }
}
