// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::GroupId;
use super::surface::DiagramSurface;

/// Pointer-drag state. At most one drag is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        group_id: GroupId,
        last_x: i32,
        last_y: i32,
    },
}

/// Turns pointer down/move/up events into shape-group moves on a [`DiagramSurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_group(&self) -> Option<GroupId> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { group_id, .. } => Some(group_id),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts dragging the shape under the pointer; stays idle when nothing is hit.
    pub fn pointer_down(&mut self, surface: &DiagramSurface, x: i32, y: i32) -> Option<GroupId> {
        let group_id = surface.hit_test(x, y);
        self.state = match group_id {
            Some(group_id) => DragState::Dragging { group_id, last_x: x, last_y: y },
            None => DragState::Idle,
        };
        group_id
    }

    /// Moves the active group by the pointer delta since the previous event.
    ///
    /// Returns the applied delta, or `None` while idle.
    pub fn pointer_move(
        &mut self,
        surface: &mut DiagramSurface,
        x: i32,
        y: i32,
    ) -> Option<(i32, i32)> {
        let DragState::Dragging { group_id, last_x, last_y } = self.state else {
            return None;
        };

        let delta = (x - last_x, y - last_y);
        surface.move_group(Some(group_id), delta.0, delta.1);
        self.state = DragState::Dragging { group_id, last_x: x, last_y: y };
        Some(delta)
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
