// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Positioned shapes for the components of a session.
//!
//! Coordinates are abstract surface units (the terminal view scales them down to cells). New
//! shapes are stacked in a single column: the k-th shape starts at `y = BASE_Y + k * ROW_HEIGHT`.

use smallvec::{smallvec, SmallVec};

use super::ids::GroupId;

pub const BASE_X: i32 = 50;
pub const BASE_Y: i32 = 50;
pub const ROW_HEIGHT: i32 = 60;
pub const SHAPE_WIDTH: i32 = 100;
pub const SHAPE_HEIGHT: i32 = 40;

/// Maximum distance (in surface units) between the pointer and a shape for a pick to count.
pub const HIT_HALO: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> (i32, i32) {
        ((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (self.x1..=self.x2).contains(&x) && (self.y1..=self.y2).contains(&y)
    }

    fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }

    /// Squared distance from `(x, y)` to the closest point of the rectangle; zero inside.
    fn distance_sq(&self, x: i32, y: i32) -> i64 {
        let dx = i64::from((self.x1 - x).max(0).max(x - self.x2));
        let dy = i64::from((self.y1 - y).max(0).max(y - self.y2));
        dx * dx + dy * dy
    }
}

/// One visual element of a shape group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    Rectangle(Rect),
    /// Text centred on `(x, y)`.
    Label { x: i32, y: i32, text: String },
}

impl Primitive {
    fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Self::Rectangle(rect) => *rect = rect.translated(dx, dy),
            Self::Label { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }

    fn distance_sq(&self, px: i32, py: i32) -> i64 {
        match self {
            Self::Rectangle(rect) => rect.distance_sq(px, py),
            Self::Label { x, y, .. } => {
                let dx = i64::from(px - *x);
                let dy = i64::from(py - *y);
                dx * dx + dy * dy
            }
        }
    }
}

/// The primitives (rectangle + label) drawn for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGroup {
    group_id: GroupId,
    primitives: SmallVec<[Primitive; 2]>,
}

impl ShapeGroup {
    fn new(group_id: GroupId, rect: Rect, label: &str) -> Self {
        let (cx, cy) = rect.center();
        Self {
            group_id,
            primitives: smallvec![
                Primitive::Rectangle(rect),
                Primitive::Label { x: cx, y: cy, text: label.to_owned() },
            ],
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn rect(&self) -> Rect {
        self.primitives
            .iter()
            .find_map(|primitive| match primitive {
                Primitive::Rectangle(rect) => Some(*rect),
                Primitive::Label { .. } => None,
            })
            .unwrap_or(Rect::new(0, 0, 0, 0))
    }

    pub fn label(&self) -> &str {
        self.primitives
            .iter()
            .find_map(|primitive| match primitive {
                Primitive::Label { text, .. } => Some(text.as_str()),
                Primitive::Rectangle(_) => None,
            })
            .unwrap_or("")
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for primitive in &mut self.primitives {
            primitive.translate(dx, dy);
        }
    }

    fn distance_sq(&self, x: i32, y: i32) -> i64 {
        self.primitives
            .iter()
            .map(|primitive| primitive.distance_sq(x, y))
            .min()
            .unwrap_or(i64::MAX)
    }
}

/// Shape groups in placement order; `groups[i]` always carries `GroupId::new(i)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSurface {
    groups: Vec<ShapeGroup>,
}

impl DiagramSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle the next placed shape will occupy.
    pub fn next_rect(&self) -> Rect {
        let count = i32::try_from(self.groups.len()).unwrap_or(i32::MAX);
        let y1 = BASE_Y.saturating_add(count.saturating_mul(ROW_HEIGHT));
        Rect::new(BASE_X, y1, BASE_X + SHAPE_WIDTH, y1.saturating_add(SHAPE_HEIGHT))
    }

    pub fn place_next(&mut self, label: &str) -> GroupId {
        let group_id = GroupId::new(self.groups.len());
        let rect = self.next_rect();
        self.groups.push(ShapeGroup::new(group_id, rect, label));
        group_id
    }

    /// Translates every primitive of `group_id`; absent or `None` ids are ignored.
    pub fn move_group(&mut self, group_id: Option<GroupId>, dx: i32, dy: i32) -> bool {
        let Some(group) = group_id.and_then(|id| self.get_mut(id)) else {
            return false;
        };
        group.translate(dx, dy);
        true
    }

    pub fn remove_last(&mut self) -> Option<ShapeGroup> {
        self.groups.pop()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Nearest group to `(x, y)` within [`HIT_HALO`]; ties go to the most recently placed.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<GroupId> {
        let halo_sq = i64::from(HIT_HALO) * i64::from(HIT_HALO);
        let mut best: Option<(i64, GroupId)> = None;
        for group in self.groups.iter().rev() {
            let distance = group.distance_sq(x, y);
            if distance > halo_sq {
                continue;
            }
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, group.group_id()));
            }
        }
        best.map(|(_, group_id)| group_id)
    }

    pub fn get(&self, group_id: GroupId) -> Option<&ShapeGroup> {
        self.groups.get(group_id.index()).filter(|group| group.group_id() == group_id)
    }

    fn get_mut(&mut self, group_id: GroupId) -> Option<&mut ShapeGroup> {
        self.groups.get_mut(group_id.index()).filter(|group| group.group_id() == group_id)
    }

    pub fn last_id(&self) -> Option<GroupId> {
        self.groups.last().map(ShapeGroup::group_id)
    }

    pub fn groups(&self) -> &[ShapeGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
