// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Canvas;

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if text_len(text) <= max_len {
        return text.to_owned();
    }
    if max_len == 1 {
        return "…".to_owned();
    }

    let mut out: String = text.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Column offset that centres `text` inside `width` cells, left-biased on odd slack.
pub(crate) fn centered_offset(text: &str, width: usize) -> usize {
    width.saturating_sub(text_len(text)) / 2
}

/// Canvas lines with trailing blanks and trailing empty rows dropped.
pub(crate) fn canvas_to_string_trimmed(canvas: &Canvas) -> String {
    let mut lines = canvas
        .to_lines()
        .into_iter()
        .map(|line| line.trim_end_matches(' ').to_owned())
        .collect::<Vec<_>>();
    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
