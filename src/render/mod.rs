// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of the diagram surface.
//!
//! Shapes are drawn onto a fixed-size [`Canvas`] of terminal cells. Overlapping box borders
//! merge into junction characters instead of overwriting each other.

use std::fmt;

use thiserror::Error;

pub mod surface;
mod text;

pub use surface::{
    cell_to_surface, render_surface, render_surface_text, surface_to_cell, CellRect, SurfaceRender,
    X_UNITS_PER_CELL, Y_UNITS_PER_CELL,
};
pub(crate) use text::truncate_with_ellipsis;

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

const EDGE_LEFT: u8 = 1 << 0;
const EDGE_RIGHT: u8 = 1 << 1;
const EDGE_UP: u8 = 1 << 2;
const EDGE_DOWN: u8 = 1 << 3;

fn edges_of(ch: char) -> Option<u8> {
    let edges = match ch {
        UNICODE_BOX_HORIZONTAL => EDGE_LEFT | EDGE_RIGHT,
        UNICODE_BOX_VERTICAL => EDGE_UP | EDGE_DOWN,
        UNICODE_BOX_TOP_LEFT => EDGE_RIGHT | EDGE_DOWN,
        UNICODE_BOX_TOP_RIGHT => EDGE_LEFT | EDGE_DOWN,
        UNICODE_BOX_BOTTOM_LEFT => EDGE_RIGHT | EDGE_UP,
        UNICODE_BOX_BOTTOM_RIGHT => EDGE_LEFT | EDGE_UP,
        UNICODE_BOX_TEE_RIGHT => EDGE_UP | EDGE_DOWN | EDGE_RIGHT,
        UNICODE_BOX_TEE_LEFT => EDGE_UP | EDGE_DOWN | EDGE_LEFT,
        UNICODE_BOX_TEE_DOWN => EDGE_LEFT | EDGE_RIGHT | EDGE_DOWN,
        UNICODE_BOX_TEE_UP => EDGE_LEFT | EDGE_RIGHT | EDGE_UP,
        UNICODE_BOX_CROSS => EDGE_LEFT | EDGE_RIGHT | EDGE_UP | EDGE_DOWN,
        _ => return None,
    };
    Some(edges)
}

fn char_of(edges: u8) -> char {
    match edges {
        0 => ' ',
        1..=3 => UNICODE_BOX_HORIZONTAL,
        4 | 8 | 12 => UNICODE_BOX_VERTICAL,
        10 => UNICODE_BOX_TOP_LEFT,
        9 => UNICODE_BOX_TOP_RIGHT,
        6 => UNICODE_BOX_BOTTOM_LEFT,
        5 => UNICODE_BOX_BOTTOM_RIGHT,
        14 => UNICODE_BOX_TEE_RIGHT,
        13 => UNICODE_BOX_TEE_LEFT,
        11 => UNICODE_BOX_TEE_DOWN,
        7 => UNICODE_BOX_TEE_UP,
        _ => UNICODE_BOX_CROSS,
    }
}

/// A fixed-size character grid.
///
/// Text overwrites (last writer wins); box-drawing characters accumulate edges and render as
/// the matching junction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self { width, height, cells: vec![' '; len], edges: vec![0; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.render_at(idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match edges_of(ch) {
            Some(edges) => self.edges[idx] |= edges,
            None => {
                self.cells[idx] = ch;
                self.edges[idx] = 0;
            }
        }
        Ok(())
    }

    /// Like [`Canvas::set`] but silently drops writes outside the grid.
    fn put(&mut self, x: i64, y: i64, ch: char) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            let _ = self.set(x, y, ch);
        }
    }

    /// Writes `text` starting at `(x, y)`, clipped to the grid.
    pub fn write_clipped(&mut self, x: i64, y: i64, text: &str) {
        for (offset, ch) in (0i64..).zip(text.chars()) {
            self.put(x + offset, y, ch);
        }
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`, clipped to the grid.
    pub fn draw_box_clipped(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));

        for x in (min_x + 1)..max_x {
            self.put(x, min_y, UNICODE_BOX_HORIZONTAL);
            self.put(x, max_y, UNICODE_BOX_HORIZONTAL);
        }
        for y in (min_y + 1)..max_y {
            self.put(min_x, y, UNICODE_BOX_VERTICAL);
            self.put(max_x, y, UNICODE_BOX_VERTICAL);
        }
        self.put(min_x, min_y, UNICODE_BOX_TOP_LEFT);
        self.put(max_x, min_y, UNICODE_BOX_TOP_RIGHT);
        self.put(min_x, max_y, UNICODE_BOX_BOTTOM_LEFT);
        self.put(max_x, max_y, UNICODE_BOX_BOTTOM_RIGHT);
    }

    /// Blanks the interior of a box so shapes drawn later hide the ones underneath.
    pub fn clear_interior(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        for y in (y0.min(y1) + 1)..y0.max(y1) {
            for x in (x0.min(x1) + 1)..x0.max(x1) {
                let (Ok(ux), Ok(uy)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if ux < self.width && uy < self.height {
                    let idx = uy * self.width + ux;
                    self.cells[idx] = ' ';
                    self.edges[idx] = 0;
                }
            }
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y * self.width + x)
    }

    fn render_at(&self, idx: usize) -> char {
        match self.edges[idx] {
            0 => self.cells[idx],
            edges => char_of(edges),
        }
    }

    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let row = y * self.width;
                (row..row + self.width).map(|idx| self.render_at(idx)).collect()
            })
            .collect()
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lines().join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}
