// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threatsketch CLI entrypoint.
//!
//! `threatsketch` (or `threatsketch edit`) opens the diagram editor; `threatsketch view [FILE]`
//! opens the threat report viewer. Log records go to a file because the terminal belongs to the
//! UI.

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use log::{debug, info, LevelFilter};

const DEFAULT_LOG_FILE: &str = "threatsketch.log";

/// Threat model diagram editor and CWE findings viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Log file; defaults to the platform cache directory
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Edit a threat model diagram (default)
    Edit,
    /// Browse a threat report file grouped into tabs
    View {
        /// Report file; prompts for a path when omitted
        file: Option<PathBuf>,
    },
}

fn default_log_file() -> Option<PathBuf> {
    ProjectDirs::from("com", "threatsketch", "threatsketch")
        .map(|dirs| dirs.cache_dir().join(DEFAULT_LOG_FILE))
}

fn init_logging(args: &Args) {
    let level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    if level == LevelFilter::Off {
        return;
    }

    let Some(path) = args.log_file.clone().or_else(default_log_file) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = File::options().create(true).append(true).open(&path) else {
        return;
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    info!(log_level:% = level, path = path.display().to_string(); "Starting threatsketch");
}

fn main() {
    let args = Args::parse();
    init_logging(&args);
    debug!(args:?; "Parsed arguments");

    let result = (|| -> Result<(), Box<dyn Error>> {
        match args.command.clone().unwrap_or(Command::Edit) {
            Command::Edit => {
                let config = threatsketch::config::load_config(args.config.as_deref())?;
                threatsketch::tui::run_editor(config)
            }
            Command::View { file } => threatsketch::tui::run_viewer(file),
        }
    })();

    if let Err(err) = result {
        log::error!(error:% = err; "threatsketch failed");
        eprintln!("threatsketch: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Args, Command};

    #[test]
    fn no_subcommand_defaults_to_editor_options() {
        let args = Args::try_parse_from(["threatsketch"]).expect("args");
        assert_eq!(args.command, None);
        assert_eq!(args.log_level, "warn");
        assert_eq!(args.config, None);
    }

    #[test]
    fn view_takes_optional_file() {
        let args = Args::try_parse_from(["threatsketch", "view", "threats.txt"]).expect("args");
        assert_eq!(args.command, Some(Command::View { file: Some(PathBuf::from("threats.txt")) }));

        let args = Args::try_parse_from(["threatsketch", "view"]).expect("args");
        assert_eq!(args.command, Some(Command::View { file: None }));
    }

    #[test]
    fn global_options_work_after_subcommand() {
        let args = Args::try_parse_from([
            "threatsketch",
            "edit",
            "--config",
            "plant.toml",
            "--log-level",
            "debug",
            "--log-file",
            "/tmp/ts.log",
        ])
        .expect("args");
        assert_eq!(args.command, Some(Command::Edit));
        assert_eq!(args.config, Some(PathBuf::from("plant.toml")));
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/ts.log")));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["threatsketch", "export"]).is_err());
    }
}
