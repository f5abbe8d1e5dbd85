// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Projection of the diagram surface onto terminal cells.
//!
//! Surface coordinates are much finer than a terminal grid. One cell spans
//! [`X_UNITS_PER_CELL`] horizontally and [`Y_UNITS_PER_CELL`] vertically, so the default
//! 100x40 shape renders as a 21x5 box.

use crate::model::{DiagramSurface, GroupId, Primitive};

use super::text::{canvas_to_string_trimmed, centered_offset, truncate_with_ellipsis};
use super::{Canvas, CanvasError};

pub const X_UNITS_PER_CELL: i32 = 5;
pub const Y_UNITS_PER_CELL: i32 = 10;

/// Inclusive cell bounds of a rendered shape. May lie partly or fully off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl CellRect {
    pub fn contains(&self, col: i64, row: i64) -> bool {
        (self.x0..=self.x1).contains(&col) && (self.y0..=self.y1).contains(&row)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRender {
    pub lines: Vec<String>,
    pub bounds: Vec<(GroupId, CellRect)>,
}

impl SurfaceRender {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Maps a surface point to the cell containing it.
pub fn surface_to_cell(x: i32, y: i32) -> (i64, i64) {
    (
        i64::from(x.div_euclid(X_UNITS_PER_CELL)),
        i64::from(y.div_euclid(Y_UNITS_PER_CELL)),
    )
}

/// Maps a cell, relative to the canvas origin and possibly negative, to the surface point at
/// its centre.
pub fn cell_to_surface(col: i32, row: i32) -> (i32, i32) {
    (
        col * X_UNITS_PER_CELL + X_UNITS_PER_CELL / 2,
        row * Y_UNITS_PER_CELL + Y_UNITS_PER_CELL / 2,
    )
}

/// Draws every shape group in placement order, so later groups cover earlier ones.
pub fn render_surface(
    surface: &DiagramSurface,
    width: usize,
    height: usize,
) -> Result<SurfaceRender, CanvasError> {
    let (canvas, bounds) = draw_surface(surface, width, height)?;
    Ok(SurfaceRender { lines: canvas.to_lines(), bounds })
}

/// Renders at a fixed size and returns trimmed text, for snapshots and benches.
pub fn render_surface_text(
    surface: &DiagramSurface,
    width: usize,
    height: usize,
) -> Result<String, CanvasError> {
    let (canvas, _) = draw_surface(surface, width, height)?;
    Ok(canvas_to_string_trimmed(&canvas))
}

fn draw_surface(
    surface: &DiagramSurface,
    width: usize,
    height: usize,
) -> Result<(Canvas, Vec<(GroupId, CellRect)>), CanvasError> {
    let mut canvas = Canvas::new(width, height)?;
    let mut bounds = Vec::with_capacity(surface.len());

    for group in surface.groups() {
        let mut cell_rect = None;
        for primitive in group.primitives() {
            match primitive {
                Primitive::Rectangle(rect) => {
                    let (x0, y0) = surface_to_cell(rect.x1, rect.y1);
                    let (x1, y1) = surface_to_cell(rect.x2, rect.y2);
                    canvas.clear_interior(x0, y0, x1, y1);
                    canvas.draw_box_clipped(x0, y0, x1, y1);
                    cell_rect = Some(CellRect { x0, y0, x1, y1 });
                }
                Primitive::Label { x, y, text } => {
                    let (col, row) = surface_to_cell(*x, *y);
                    let (start, room) = match cell_rect {
                        Some(r) => (r.x0 + 1, usize::try_from(r.x1 - r.x0 - 1).unwrap_or(0)),
                        None => (col, text.chars().count()),
                    };
                    let label = truncate_with_ellipsis(text, room);
                    let offset = i64::try_from(centered_offset(&label, room)).unwrap_or(0);
                    canvas.write_clipped(start + offset, row, &label);
                }
            }
        }
        if let Some(cell_rect) = cell_rect {
            bounds.push((group.group_id(), cell_rect));
        }
    }

    Ok((canvas, bounds))
}
