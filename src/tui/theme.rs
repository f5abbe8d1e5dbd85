// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

const PALETTE_ENV: &str = "THREATSKETCH_PALETTE";

/// Colours used by both terminal screens.
///
/// `THREATSKETCH_PALETTE` may override them as `fg,bg,accent,error` hex triplets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    accent: Color,
    error: Color,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        match env::var(PALETTE_ENV) {
            Ok(value) if value.trim().is_empty() => Ok(Self::default()),
            Ok(value) => {
                let palette = TuiPalette::parse_csv(value.trim()).map_err(|reason| {
                    ThemeError::InvalidEnv { name: PALETTE_ENV, value: value.clone(), reason }
                })?;
                Ok(Self { palette: Some(palette) })
            }
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV,
                value: "<non-unicode>".to_owned(),
                reason: "not valid unicode".to_owned(),
            }),
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn accent(&self) -> Color {
        self.palette.map_or(Color::LightGreen, |palette| palette.accent)
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.accent())
        } else {
            self.base_style()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        let error = self.palette.map_or(Color::Red, |palette| palette.error);
        self.base_style().fg(error)
    }
}

impl TuiPalette {
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        let [fg, bg, accent, error] = parts.as_slice() else {
            return Err(format!("expected 4 comma-separated colors (fg,bg,accent,error), got {}", parts.len()));
        };
        Ok(Self {
            fg: parse_hex_color(fg)?,
            bg: parse_hex_color(bg)?,
            accent: parse_hex_color(accent)?,
            error: parse_hex_color(error)?,
        })
    }
}

fn parse_hex_color(value: &str) -> Result<Color, String> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {value} (expected #RRGGBB)"));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color: {value}"))
    };
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value} ({reason})")]
    InvalidEnv { name: &'static str, value: String, reason: String },
}
