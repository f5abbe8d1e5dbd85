// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration file loading.
//!
//! Search order:
//! 1. explicit `--config` path
//! 2. `threatsketch/config.toml` in the working directory
//! 3. the platform config directory
//! 4. built-in defaults

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LOCAL_CONFIG_PATH: &str = "threatsketch/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),
}

/// A program plus fixed leading arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Program to run; `None` means the running executable.
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandConfig {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: Some(program.into()), args: args.into_iter().map(Into::into).collect() }
    }

    pub fn current_exe<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: None, args: args.into_iter().map(Into::into).collect() }
    }

    pub fn resolve_program(&self) -> io::Result<String> {
        match &self.program {
            Some(program) => Ok(program.clone()),
            None => Ok(env::current_exe()?.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Entries of the known-component dropdown.
    pub known_components: Vec<String>,
    pub analysis: CommandConfig,
    pub viewer: CommandConfig,
    pub update: CommandConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            known_components: [
                "PLC",
                "IED",
                "RTU",
                "Sensor",
                "Actuator",
                "Historian",
                "Windows Server",
                "Embedded Linux",
                "Scada",
                "HMI",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            analysis: CommandConfig::new("python3", ["final_app.py"]),
            viewer: CommandConfig::current_exe(["view"]),
            update: CommandConfig::new(
                "python3",
                ["-c", "import final_app; final_app.update_threat_list()"],
            ),
        }
    }
}

impl AppConfig {
    /// Dropdown entries with blanks and repeats removed, first occurrence wins.
    pub fn dropdown_entries(&self) -> Vec<String> {
        let mut entries = Vec::<String>::with_capacity(self.known_components.len());
        for entry in &self.known_components {
            let entry = entry.trim();
            if !entry.is_empty() && !entries.iter().any(|existing| existing == entry) {
                entries.push(entry.to_owned());
            }
        }
        entries
    }
}

pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG_PATH);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "threatsketch", "threatsketch") {
        let system_config = proj_dirs.config_dir().join("config.toml");
        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }
        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

pub fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load_config, load_config_file, AppConfig, CommandConfig, ConfigError};

    #[test]
    fn defaults_mirror_known_components() {
        let config = AppConfig::default();
        assert_eq!(config.known_components.len(), 10);
        assert_eq!(config.viewer, CommandConfig::current_exe(["view"]));
        assert_eq!(config.analysis.program.as_deref(), Some("python3"));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
known_components = ["PLC", "Gateway"]

[analysis]
program = "analyze-components"
args = ["--json"]
"#,
        )
        .expect("write");

        let config = load_config_file(&path).expect("config");
        assert_eq!(config.known_components, ["PLC", "Gateway"]);
        assert_eq!(config.analysis, CommandConfig::new("analyze-components", ["--json"]));
        assert_eq!(config.update, AppConfig::default().update);
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(Some(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "known_components = 3").expect("write");

        assert!(matches!(load_config_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn dropdown_entries_drop_blanks_and_repeats() {
        let config = AppConfig {
            known_components: vec![
                "PLC".to_owned(),
                "Actuator".to_owned(),
                " ".to_owned(),
                "Actuator".to_owned(),
            ],
            ..AppConfig::default()
        };
        assert_eq!(config.dropdown_entries(), ["PLC", "Actuator"]);
    }
}
