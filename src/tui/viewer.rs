// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only, tabbed view of a threat report file.

use std::{
    error::Error,
    path::{Path, PathBuf},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{info, warn};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};

use crate::format::{load_threat_report, ReportError, ReportGroups};

use super::{theme::TuiTheme, TerminalSession};

const NO_DATA_MESSAGE: &str = "No threat data found.";

/// Shows the report at `path`, or asks for a path first when none is given.
pub fn run_viewer(path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut viewer = Viewer::new(path.as_deref(), theme);

    while !viewer.should_quit {
        terminal.draw(|frame| draw(frame, &viewer))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    viewer.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewerState {
    Prompt { input: String },
    Report { groups: ReportGroups, selected: usize, scroll: u16 },
    Failed { message: String },
}

impl ViewerState {
    fn from_result(result: Result<ReportGroups, ReportError>) -> Self {
        match result {
            Ok(groups) if groups.is_empty() => Self::Failed { message: NO_DATA_MESSAGE.to_owned() },
            Ok(groups) => Self::Report { groups, selected: 0, scroll: 0 },
            Err(ReportError::NoData) => Self::Failed { message: NO_DATA_MESSAGE.to_owned() },
            Err(err) => {
                warn!(error:% = err; "threat report unavailable");
                Self::Failed { message: err.to_string() }
            }
        }
    }
}

struct Viewer {
    state: ViewerState,
    theme: TuiTheme,
    should_quit: bool,
}

impl Viewer {
    fn new(path: Option<&Path>, theme: TuiTheme) -> Self {
        let state = match path {
            Some(path) => Self::load(Some(path)),
            None => ViewerState::Prompt { input: String::new() },
        };
        Self { state, theme, should_quit: false }
    }

    fn load(path: Option<&Path>) -> ViewerState {
        if let Some(path) = path {
            info!(path = path.display().to_string(); "loading threat report");
        }
        ViewerState::from_result(load_threat_report(path))
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.state {
            ViewerState::Prompt { input } => match key.code {
                KeyCode::Char(ch) => input.push(ch),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let path = PathBuf::from(input.trim());
                    let chosen = (!path.as_os_str().is_empty()).then_some(path.as_path());
                    self.state = Self::load(chosen);
                }
                KeyCode::Esc => self.state = Self::load(None),
                _ => {}
            },
            ViewerState::Report { groups, selected, scroll } => match key.code {
                KeyCode::Right | KeyCode::Tab => {
                    *selected = (*selected + 1) % groups.len();
                    *scroll = 0;
                }
                KeyCode::Left | KeyCode::BackTab => {
                    *selected = selected.checked_sub(1).unwrap_or(groups.len() - 1);
                    *scroll = 0;
                }
                KeyCode::Down => *scroll = scroll.saturating_add(1),
                KeyCode::Up => *scroll = scroll.saturating_sub(1),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            ViewerState::Failed { .. } => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                    self.should_quit = true;
                }
            }
        }
    }
}

fn draw(frame: &mut Frame<'_>, viewer: &Viewer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.size());
    let block = Block::default().borders(Borders::ALL).title(" Analysis Results ");

    let footer = match &viewer.state {
        ViewerState::Prompt { input } => {
            let prompt = Paragraph::new(vec![
                Line::from("Select Threat Data File:"),
                Line::from(format!("{input}▏")),
            ])
            .block(block);
            frame.render_widget(prompt, rows[0]);
            "Enter open · Esc cancel"
        }
        ViewerState::Report { groups, selected, scroll } => {
            let inner = block.inner(rows[0]);
            frame.render_widget(block, rows[0]);
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(inner);

            let titles =
                groups.titles().map(|title| Line::from(title.to_owned())).collect::<Vec<_>>();
            let tabs = Tabs::new(titles)
                .select(*selected)
                .highlight_style(viewer.theme.selection_style())
                .block(Block::default().borders(Borders::BOTTOM));
            frame.render_widget(tabs, parts[0]);

            let text = groups.group(*selected).map(|group| group.to_text()).unwrap_or_default();
            let body = Paragraph::new(text).wrap(Wrap { trim: false }).scroll((*scroll, 0));
            frame.render_widget(body, parts[1]);
            "←/→ tab · ↑/↓ scroll · q quit"
        }
        ViewerState::Failed { message } => {
            let error = Paragraph::new(Line::from(Span::styled(
                message.clone(),
                viewer.theme.error_style(),
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(error, rows[0]);
            "q quit"
        }
    };

    frame.render_widget(Paragraph::new(Span::styled(footer, viewer.theme.key_style())), rows[1]);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use super::{draw, Viewer, ViewerState, NO_DATA_MESSAGE};
    use crate::tui::theme::TuiTheme;

    const REPORT: &str = "Network Threats\nCWE-319 Cleartext Transmission\nCWE-287 Improper Authentication\n\nPhysical Threats\nCWE-1263 Improper Physical Access Control\n";

    fn press(viewer: &mut Viewer, code: KeyCode) {
        viewer.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(viewer: &Viewer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).expect("terminal");
        terminal.draw(|frame| draw(frame, viewer)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn viewer_for(content: &str) -> (tempfile::TempDir, Viewer) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("threats.txt");
        fs::write(&path, content).expect("write");
        let viewer = Viewer::new(Some(path.as_path()), TuiTheme::default());
        (dir, viewer)
    }

    #[test]
    fn report_tabs_switch_with_arrows_and_wrap() {
        let (_dir, mut viewer) = viewer_for(REPORT);
        let screen_text = screen(&viewer);
        assert!(screen_text.contains("Network Threats"));
        assert!(screen_text.contains("Physical Threats"));
        assert!(screen_text.contains("CWE-319 Cleartext Transmission"));

        press(&mut viewer, KeyCode::Right);
        assert!(matches!(viewer.state, ViewerState::Report { selected: 1, .. }));
        assert!(screen(&viewer).contains("CWE-1263"));

        press(&mut viewer, KeyCode::Right);
        assert!(matches!(viewer.state, ViewerState::Report { selected: 0, .. }));
        press(&mut viewer, KeyCode::Left);
        assert!(matches!(viewer.state, ViewerState::Report { selected: 1, .. }));
    }

    #[test]
    fn file_without_headers_shows_no_data() {
        let (_dir, viewer) = viewer_for("CWE-79 orphan finding\n");
        assert_eq!(viewer.state, ViewerState::Failed { message: NO_DATA_MESSAGE.to_owned() });
        assert!(screen(&viewer).contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn prompt_loads_typed_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("threats.txt");
        fs::write(&path, REPORT).expect("write");

        let mut viewer = Viewer::new(None, TuiTheme::default());
        assert!(screen(&viewer).contains("Select Threat Data File:"));
        for ch in path.to_string_lossy().chars() {
            press(&mut viewer, KeyCode::Char(ch));
        }
        press(&mut viewer, KeyCode::Enter);

        let ViewerState::Report { groups, .. } = &viewer.state else {
            panic!("expected report, got {:?}", viewer.state);
        };
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn cancelled_prompt_shows_no_data_then_quits() {
        let mut viewer = Viewer::new(None, TuiTheme::default());
        press(&mut viewer, KeyCode::Esc);
        assert_eq!(viewer.state, ViewerState::Failed { message: NO_DATA_MESSAGE.to_owned() });

        press(&mut viewer, KeyCode::Char('q'));
        assert!(viewer.should_quit);
    }

    #[test]
    fn unreadable_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.txt");
        let viewer = Viewer::new(Some(missing.as_path()), TuiTheme::default());

        let ViewerState::Failed { message } = &viewer.state else {
            panic!("expected failure, got {:?}", viewer.state);
        };
        assert!(message.contains("missing.txt"));
    }
}
