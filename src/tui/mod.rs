// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Two screens share one terminal setup: the diagram editor ([`run_editor`]) and the threat
//! report viewer ([`run_viewer`]).

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::config::AppConfig;
use crate::launch::{Launcher, ProcessLauncher};
use crate::model::{ComponentDraft, EditorSession};
use crate::ops::{apply_action, Action, Notice};
use crate::render::{cell_to_surface, render_surface, truncate_with_ellipsis};

mod theme;
mod viewer;

use theme::TuiTheme;
pub use viewer::run_viewer;

include!("chrome.rs");

/// Runs the interactive diagram editor until the user quits.
pub fn run_editor(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(config, ProcessLauncher, theme);
    info!(known_components = app.dropdown.len(); "editor started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    info!(components = app.session.components().len(); "editor closed");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptPurpose {
    Open,
    Save,
}

impl PromptPurpose {
    fn title(self) -> &'static str {
        match self {
            Self::Open => "Open Model",
            Self::Save => "Save Model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathPrompt {
    purpose: PromptPurpose,
    input: String,
}

struct App<L> {
    session: EditorSession,
    config: AppConfig,
    launcher: L,
    theme: TuiTheme,
    dropdown: Vec<String>,
    selected: Option<usize>,
    custom_name: String,
    description: String,
    focus: Focus,
    prompt: Option<PathPrompt>,
    status: Option<Notice>,
    popup: Option<Notice>,
    /// Inner area of the diagram panel as of the last draw.
    canvas_area: Rect,
    should_quit: bool,
}

impl<L: Launcher> App<L> {
    fn new(config: AppConfig, launcher: L, theme: TuiTheme) -> Self {
        let dropdown = config.dropdown_entries();
        Self {
            session: EditorSession::new(),
            config,
            launcher,
            theme,
            dropdown,
            selected: None,
            custom_name: String::new(),
            description: String::new(),
            focus: Focus::KnownComponent,
            prompt: None,
            status: None,
            popup: None,
            canvas_area: Rect::default(),
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.popup.take().is_some() {
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(ch) = key.code {
                self.handle_shortcut(ch.to_ascii_lowercase());
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => self.apply(Action::Help),
            KeyCode::F(2) => self.apply(Action::About),
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Enter if self.focus == Focus::Description => self.description.push('\n'),
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Up if self.focus == Focus::KnownComponent => self.select_previous(),
            KeyCode::Down if self.focus == Focus::KnownComponent => self.select_next(),
            KeyCode::Delete if self.focus == Focus::KnownComponent => self.selected = None,
            KeyCode::Backspace => {
                if let Some(field) = self.focused_text_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(field) = self.focused_text_mut() {
                    field.push(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_shortcut(&mut self, ch: char) {
        match ch {
            'q' => self.should_quit = true,
            'd' => self.submit_draft(),
            'z' => self.apply(Action::Undo),
            'n' => self.apply(Action::New),
            'o' => self.open_prompt(PromptPurpose::Open),
            's' => self.open_prompt(PromptPurpose::Save),
            'g' => self.apply(Action::GenerateReport),
            'a' => self.apply(Action::Analyze),
            'r' => self.apply(Action::ShowResults),
            'u' => self.apply(Action::UpdateThreatList),
            _ => {}
        }
    }

    fn open_prompt(&mut self, purpose: PromptPurpose) {
        self.prompt = Some(PathPrompt { purpose, input: String::new() });
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.input.push(ch)
            }
            KeyCode::Enter => {
                let Some(PathPrompt { purpose, input }) = self.prompt.take() else {
                    return;
                };
                let action = match purpose {
                    PromptPurpose::Open => Action::Open { path: input },
                    PromptPurpose::Save => Action::Save { path: input },
                };
                self.apply(action);
            }
            _ => {}
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::CustomName => Some(&mut self.custom_name),
            Focus::Description => Some(&mut self.description),
            Focus::KnownComponent | Focus::Canvas => None,
        }
    }

    /// Cycles `None -> first -> ... -> last -> None`.
    fn select_next(&mut self) {
        self.selected = match self.selected {
            None if self.dropdown.is_empty() => None,
            None => Some(0),
            Some(index) if index + 1 < self.dropdown.len() => Some(index + 1),
            Some(_) => None,
        };
    }

    fn select_previous(&mut self) {
        self.selected = match self.selected {
            None => self.dropdown.len().checked_sub(1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    fn selected_name(&self) -> &str {
        self.selected.and_then(|index| self.dropdown.get(index)).map_or("", String::as_str)
    }

    fn submit_draft(&mut self) {
        let draft = ComponentDraft::new(
            self.selected_name(),
            self.custom_name.as_str(),
            self.description.as_str(),
        );
        let before = self.session.components().len();
        self.apply(Action::AddComponent(draft));
        if self.session.components().len() > before {
            self.custom_name.clear();
            self.description.clear();
        }
    }

    fn apply(&mut self, action: Action) {
        let modal = matches!(action, Action::Help | Action::About);
        let notice = apply_action(&mut self.session, action, &self.config, &mut self.launcher);
        debug!(notice:% = notice; "action applied");
        if modal || notice.is_error() {
            self.popup = Some(notice.clone());
        }
        self.status = Some(notice);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.popup.is_some() || self.prompt.is_some() {
            return;
        }
        let col = i32::from(mouse.column) - i32::from(self.canvas_area.x);
        let row = i32::from(mouse.row) - i32::from(self.canvas_area.y);
        let (x, y) = cell_to_surface(col, row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.canvas_contains(mouse.column, mouse.row) {
                    return;
                }
                self.focus = Focus::Canvas;
                if let Some(group_id) = self.session.pointer_down(x, y) {
                    debug!(group_id:% = group_id; "drag started");
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.session.pointer_move(x, y);
            }
            MouseEventKind::Up(MouseButton::Left) => self.session.pointer_up(),
            _ => {}
        }
    }

    fn canvas_contains(&self, column: u16, row: u16) -> bool {
        let area = self.canvas_area;
        column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height)
    }
}

fn draw<L: Launcher>(frame: &mut Frame<'_>, app: &mut App<L>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(frame.size());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDE_PANEL_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    draw_side_panel(frame, app, columns[0]);
    draw_canvas(frame, app, columns[1]);
    frame.render_widget(Paragraph::new(notice_line(&app.theme, app.status.as_ref())), rows[1]);
    frame.render_widget(Paragraph::new(footer_line(&app.theme, app.prompt.is_some())), rows[2]);

    if let Some(prompt) = &app.prompt {
        let area = centered_rect(60, 3, frame.size());
        frame.render_widget(Clear, area);
        let input = Paragraph::new(format!("{}▏", prompt.input))
            .block(panel_block(&app.theme, prompt.purpose.title(), true));
        frame.render_widget(input, area);
    } else if let Some(popup) = &app.popup {
        let body = if popup.title == "Help" {
            popup.message.split(FOOTER_SEPARATOR).map(|entry| Line::from(entry.to_owned())).collect()
        } else if popup.is_error() {
            vec![Line::from(Span::styled(popup.message.clone(), app.theme.error_style()))]
        } else {
            vec![Line::from(popup.message.clone())]
        };
        render_popup(frame, &app.theme, popup.title, body);
    }
}

fn draw_side_panel<L: Launcher>(frame: &mut Frame<'_>, app: &App<L>, area: Rect) {
    let outer = Block::default().borders(Borders::ALL).title(" Add/Edit Component ");
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(DESCRIPTION_ROWS + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    let selection = match app.selected_name() {
        "" => Span::raw(NO_SELECTION_LABEL),
        name if app.focus == Focus::KnownComponent => {
            Span::styled(format!("‹ {name} ›"), app.theme.selection_style())
        }
        name => Span::raw(format!("‹ {name} ›")),
    };
    // Keep the end of a long description in view.
    let description_lines = app.description.split('\n').count();
    let description_scroll =
        u16::try_from(description_lines).unwrap_or(u16::MAX).saturating_sub(DESCRIPTION_ROWS);
    let fields = [
        (Focus::KnownComponent, Text::from(Line::from(selection)), 0),
        (Focus::CustomName, Text::from(app.custom_name.clone()), 0),
        (Focus::Description, Text::from(app.description.clone()), description_scroll),
    ];
    for (section, (field, text, scroll)) in sections.iter().zip(fields) {
        let focused = app.focus == field;
        frame.render_widget(
            Paragraph::new(text)
                .scroll((scroll, 0))
                .block(panel_block(&app.theme, field.title(), focused)),
            *section,
        );
    }

    let width = usize::from(sections[3].width.saturating_sub(2));
    let items = app
        .session
        .components()
        .iter()
        .map(|component| {
            ListItem::new(truncate_with_ellipsis(&format!("Component: {}", component.name()), width))
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        List::new(items).block(panel_block(&app.theme, "Components", false)),
        sections[3],
    );
}

fn draw_canvas<L: Launcher>(frame: &mut Frame<'_>, app: &mut App<L>, area: Rect) {
    let title = match app.session.drag().active_group() {
        Some(group_id) => format!("{} · moving {group_id}", Focus::Canvas.title()),
        None => Focus::Canvas.title().to_owned(),
    };
    let block = panel_block(&app.theme, title, app.focus == Focus::Canvas);
    let inner = block.inner(area);
    app.canvas_area = inner;

    let lines = render_surface(
        app.session.surface(),
        usize::from(inner.width),
        usize::from(inner.height),
    )
    .map(|render| render.lines)
    .unwrap_or_default();
    frame.render_widget(Paragraph::new(lines.join("\n")).block(block), area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
