// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Focus, panel titles, footer and popup helpers shared by the editor screen.

const SIDE_PANEL_WIDTH: u16 = 38;
const FOOTER_SEPARATOR: &str = " · ";
const NO_SELECTION_LABEL: &str = "(none)";
const DESCRIPTION_ROWS: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    KnownComponent,
    CustomName,
    Description,
    Canvas,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::KnownComponent => Self::CustomName,
            Self::CustomName => Self::Description,
            Self::Description => Self::Canvas,
            Self::Canvas => Self::KnownComponent,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::KnownComponent => Self::Canvas,
            Self::CustomName => Self::KnownComponent,
            Self::Description => Self::CustomName,
            Self::Canvas => Self::Description,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::KnownComponent => "Select Known Component",
            Self::CustomName => "Or Enter Custom Component Name",
            Self::Description => "Description",
            Self::Canvas => "Diagram",
        }
    }
}

fn panel_block(theme: &TuiTheme, title: impl Into<String>, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style(focused))
        .title(format!(" {} ", title.into()))
}

fn footer_line(theme: &TuiTheme, prompt_open: bool) -> Line<'static> {
    let entries: &[(&str, &str)] = if prompt_open {
        &[("Enter", "confirm"), ("Esc", "cancel")]
    } else {
        &[
            ("Tab", "field"),
            ("^D", "add"),
            ("^Z", "undo"),
            ("^A", "analyze"),
            ("^R", "results"),
            ("F1", "help"),
            ("^Q", "quit"),
        ]
    };

    let mut spans = Vec::<Span<'static>>::with_capacity(entries.len() * 3);
    for (key, label) in entries {
        if !spans.is_empty() {
            spans.push(Span::raw(FOOTER_SEPARATOR));
        }
        spans.push(Span::styled((*key).to_owned(), theme.key_style()));
        spans.push(Span::raw(format!(" {label}")));
    }
    Line::from(spans)
}

fn notice_line(theme: &TuiTheme, notice: Option<&Notice>) -> Line<'static> {
    match notice {
        Some(notice) if notice.is_error() => {
            Line::from(Span::styled(notice.to_string(), theme.error_style()))
        }
        Some(notice) => Line::from(notice.to_string()),
        None => Line::default(),
    }
}

/// A popup of fixed `height` rows, `width_percent` of the area wide, centred.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_margin = 100u16.saturating_sub(width_percent) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

/// Rows `line` occupies when word-wrapped to `width` columns.
fn wrapped_rows(line: &Line<'_>, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let text = line.spans.iter().map(|span| span.content.as_ref()).collect::<String>();
    let mut rows = 1;
    let mut used = 0;
    for word in text.split(' ') {
        let word_width = Span::raw(word).width();
        let needed = if used == 0 { word_width } else { used + 1 + word_width };
        if needed <= width {
            used = needed;
        } else if word_width <= width {
            rows += 1;
            used = word_width;
        } else {
            let head = if used == 0 { 0 } else { used + 1 };
            let total = head + word_width;
            rows += (total - 1) / width;
            used = (total - 1) % width + 1;
        }
    }
    rows
}

fn render_popup(frame: &mut Frame<'_>, theme: &TuiTheme, title: &str, body: Vec<Line<'static>>) {
    let mut lines = body;
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Press any key to close", theme.key_style())));

    let inner_width = usize::from(centered_rect(60, 0, frame.size()).width.saturating_sub(2));
    let rows = lines.iter().map(|line| wrapped_rows(line, inner_width)).sum::<usize>();
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(60, height, frame.size());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(lines)
        .block(panel_block(theme, title, true))
        .wrap(Wrap { trim: false });
    frame.render_widget(popup, area);
}
