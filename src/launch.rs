// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Detached launches of external programs.
//!
//! The editor fires a job and forgets it: stdio is discarded and a background thread reaps the
//! child when it exits.

use std::io;
use std::process::{Command, Stdio};
use std::thread;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::CommandConfig;

/// What an external job is for; used for messages and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Analysis,
    Viewer,
    UpdateThreatList,
}

impl JobKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Viewer => "results viewer",
            Self::UpdateThreatList => "threat list update",
        }
    }
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchJob {
    pub kind: JobKind,
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchJob {
    pub fn from_config(kind: JobKind, config: &CommandConfig) -> Result<Self, LaunchError> {
        let program = config.resolve_program().map_err(|source| LaunchError::Spawn {
            kind,
            program: String::new(),
            source,
        })?;
        if program.trim().is_empty() {
            return Err(LaunchError::EmptyCommand { kind });
        }
        Ok(Self { kind, program, args: config.args.clone() })
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no {} command configured", .kind.label())]
    EmptyCommand { kind: JobKind },
    #[error("failed to start {} (`{program}`): {source}", .kind.label())]
    Spawn {
        kind: JobKind,
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize components: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Starts jobs without tracking them.
pub trait Launcher {
    fn launch(&mut self, job: &LaunchJob) -> Result<(), LaunchError>;
}

/// Spawns real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, job: &LaunchJob) -> Result<(), LaunchError> {
        let mut child = Command::new(&job.program)
            .args(&job.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| {
                warn!(kind = job.kind.label(), program = job.program.as_str(); "launch failed");
                LaunchError::Spawn { kind: job.kind, program: job.program.clone(), source }
            })?;

        let pid = child.id();
        info!(kind = job.kind.label(), program = job.program.as_str(), pid = pid; "launched detached job");

        let kind = job.kind.label();
        let reaper = thread::Builder::new().name(format!("reap-{pid}")).spawn(move || {
            match child.wait() {
                Ok(status) => debug!(kind = kind, pid = pid, status:% = status; "detached job exited"),
                Err(err) => debug!(kind = kind, pid = pid, error:% = err; "failed to reap detached job"),
            }
        });
        if let Err(err) = reaper {
            debug!(kind = kind, pid = pid, error:% = err; "no reaper thread for detached job");
        }
        Ok(())
    }
}

/// Records jobs instead of spawning them.
#[derive(Debug, Default, Clone)]
pub struct RecordingLauncher {
    pub launched: Vec<LaunchJob>,
    pub fail_with: Option<io::ErrorKind>,
}

impl Launcher for RecordingLauncher {
    fn launch(&mut self, job: &LaunchJob) -> Result<(), LaunchError> {
        if let Some(kind) = self.fail_with {
            return Err(LaunchError::Spawn {
                kind: job.kind,
                program: job.program.clone(),
                source: io::Error::from(kind),
            });
        }
        self.launched.push(job.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{JobKind, LaunchError, LaunchJob, Launcher, ProcessLauncher};
    use crate::config::CommandConfig;

    #[test]
    fn job_from_config_keeps_program_and_args() {
        let config = CommandConfig::new("python3", ["final_app.py"]);
        let job = LaunchJob::from_config(JobKind::Analysis, &config)
            .expect("job")
            .with_arg("[]");

        assert_eq!(job.program, "python3");
        assert_eq!(job.args, ["final_app.py", "[]"]);
    }

    #[test]
    fn blank_program_is_rejected() {
        let config = CommandConfig::new("  ", Vec::<String>::new());
        let err = LaunchJob::from_config(JobKind::UpdateThreatList, &config).unwrap_err();

        assert!(matches!(err, LaunchError::EmptyCommand { kind: JobKind::UpdateThreatList }));
        assert_eq!(err.to_string(), "no threat list update command configured");
    }

    /// Children of this process that have exited but were never waited on.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        std::fs::read_dir("/proc")
            .expect("procfs")
            .filter_map(Result::ok)
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // `pid (comm) state ppid ...`; comm may contain spaces.
                let Some((_, rest)) = stat.rsplit_once(')') else {
                    return false;
                };
                let mut fields = rest.split_whitespace();
                fields.next() == Some("Z") && fields.next() == Some(me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn finished_jobs_are_reaped() {
        let job = LaunchJob {
            kind: JobKind::Analysis,
            program: "true".to_owned(),
            args: Vec::new(),
        };
        for _ in 0..3 {
            ProcessLauncher.launch(&job).expect("launch true");
        }

        let mut zombies = usize::MAX;
        for _ in 0..40 {
            std::thread::sleep(std::time::Duration::from_millis(50));
            zombies = zombie_children();
            if zombies == 0 {
                break;
            }
        }
        assert_eq!(zombies, 0);
    }

    #[test]
    fn missing_program_surfaces_spawn_error() {
        let job = LaunchJob {
            kind: JobKind::Viewer,
            program: "threatsketch-definitely-not-installed".to_owned(),
            args: Vec::new(),
        };

        let err = ProcessLauncher.launch(&job).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { kind: JobKind::Viewer, .. }));
        assert!(err.to_string().starts_with("failed to start results viewer"));
    }
}
