// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor actions.
//!
//! Every entry of the editor's action surface maps to one [`Action`]. Applying an action never
//! fails outright: errors are recovered here and reported back as a [`Notice`] for the status
//! line, leaving the session untouched.

use std::fmt;

use log::{info, warn};

use crate::config::AppConfig;
use crate::launch::{JobKind, LaunchError, LaunchJob, Launcher};
use crate::model::{ComponentDraft, EditorSession, UndoEntry, UndoOutcome};
use crate::store::resolve_model_path;

pub const HELP_TEXT: &str = "Tab/Shift-Tab: next/previous field · ↑/↓: pick known component · \
Ctrl-D or Enter: add component · Enter in Description: new line · drag boxes with the mouse · Ctrl-Z undo · Ctrl-N new · Ctrl-O open · \
Ctrl-S save · Ctrl-G report · Ctrl-A analyze · Ctrl-R results · Ctrl-U update threats · \
F1 help · F2 about · Ctrl-Q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddComponent(ComponentDraft),
    New,
    Open { path: String },
    Save { path: String },
    UpdateThreatList,
    Undo,
    GenerateReport,
    Analyze,
    ShowResults,
    Help,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing message produced by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(title: &'static str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title, message: message.into() }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, title, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

pub fn apply_action(
    session: &mut EditorSession,
    action: Action,
    config: &AppConfig,
    launcher: &mut dyn Launcher,
) -> Notice {
    match action {
        Action::AddComponent(draft) => match session.add_draft(&draft) {
            Ok(group_id) => {
                let name = session.component_for(group_id).map(|c| c.name()).unwrap_or_default();
                Notice::info("Add Component", format!("Added {name}."))
            }
            Err(err) => Notice::error("Error", err.to_string()),
        },
        Action::New => {
            session.clear();
            Notice::info("New Model", "New threat model created.")
        }
        Action::Open { path } => match resolve_model_path(&path) {
            Ok(path) => {
                info!(path = path.display().to_string(); "Opening model");
                Notice::info("Open Model", format!("Opening model from {}", path.display()))
            }
            Err(err) => Notice::error("Open Model", err.to_string()),
        },
        Action::Save { path } => match resolve_model_path(&path) {
            Ok(path) => {
                info!(path = path.display().to_string(); "Saving model");
                Notice::info("Save Model", format!("Saving model to {}", path.display()))
            }
            Err(err) => Notice::error("Save Model", err.to_string()),
        },
        Action::UpdateThreatList => {
            match launch(JobKind::UpdateThreatList, config, launcher, None) {
                Ok(()) => Notice::info("Update Started", "Vulnerability list update started."),
                Err(err) => {
                    Notice::error("Update Failed", format!("An error occurred while updating: {err}"))
                }
            }
        }
        Action::Undo => match session.undo() {
            Ok(UndoOutcome::NothingToUndo) => Notice::info("Undo", "No actions to undo."),
            Ok(UndoOutcome::Undone(UndoEntry::AddComponent { name, .. })) => {
                Notice::info("Undo", format!("Removed {name}."))
            }
            Err(err) => {
                warn!(error:% = err; "undo refused");
                Notice::error("Undo", err.to_string())
            }
        },
        Action::GenerateReport => Notice::info("Generate Report", "Report generated successfully."),
        Action::Analyze => analyze(session, config, launcher),
        Action::ShowResults => match launch(JobKind::Viewer, config, launcher, None) {
            Ok(()) => Notice::info("Show Results", "Results viewer started."),
            Err(err) => {
                Notice::error("Error", format!("Failed to open results window: {err}"))
            }
        },
        Action::Help => Notice::info("Help", HELP_TEXT),
        Action::About => Notice::info(
            "About",
            format!("Threat Modeling Tool · Version {}", env!("CARGO_PKG_VERSION")),
        ),
    }
}

fn analyze(session: &EditorSession, config: &AppConfig, launcher: &mut dyn Launcher) -> Notice {
    if session.components().is_empty() {
        return Notice::info("Info", "No components to analyze.");
    }

    let result = session
        .analysis_payload()
        .map_err(LaunchError::from)
        .and_then(|payload| launch(JobKind::Analysis, config, launcher, Some(payload)));
    match result {
        Ok(()) => Notice::info(
            "Analyze",
            format!("Analysis started for {} component(s).", session.components().len()),
        ),
        Err(err) => Notice::error("Error", format!("Failed to analyze components: {err}")),
    }
}

fn launch(
    kind: JobKind,
    config: &AppConfig,
    launcher: &mut dyn Launcher,
    payload: Option<String>,
) -> Result<(), LaunchError> {
    let command = match kind {
        JobKind::Analysis => &config.analysis,
        JobKind::Viewer => &config.viewer,
        JobKind::UpdateThreatList => &config.update,
    };
    let mut job = LaunchJob::from_config(kind, command)?;
    if let Some(payload) = payload {
        job = job.with_arg(payload);
    }
    launcher.launch(&job)
}
