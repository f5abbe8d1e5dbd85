// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::{debug, info};

use super::component::{Component, ComponentDraft, ComponentRegistry, ValidationError};
use super::drag::DragController;
use super::ids::GroupId;
use super::surface::DiagramSurface;
use super::undo::{UndoEntry, UndoError, UndoOutcome, UndoStack};

/// The editing state the TUI runs against.
///
/// Registry, surface and undo history only change together through this type, which keeps
/// `components().len() == surface().len()` after every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    registry: ComponentRegistry,
    surface: DiagramSurface,
    undo: UndoStack,
    drag: DragController,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &DiagramSurface {
        &self.surface
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn add_component(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<GroupId, ValidationError> {
        let registry_index = self.registry.add(name, description)?;
        Ok(self.place_and_record(registry_index))
    }

    pub fn add_draft(&mut self, draft: &ComponentDraft) -> Result<GroupId, ValidationError> {
        let registry_index = self.registry.add_draft(draft)?;
        Ok(self.place_and_record(registry_index))
    }

    fn place_and_record(&mut self, registry_index: usize) -> GroupId {
        let name = self
            .registry
            .get(registry_index)
            .map(|component| component.name().to_owned())
            .unwrap_or_default();
        let group_id = self.surface.place_next(&name);
        info!(name = name.as_str(), group_id:% = group_id; "component added");
        self.undo.push(UndoEntry::AddComponent { name: name.into(), registry_index, group_id });
        group_id
    }

    pub fn undo(&mut self) -> Result<UndoOutcome, UndoError> {
        let outcome = self.undo.undo(&mut self.registry, &mut self.surface)?;
        if let UndoOutcome::Undone(UndoEntry::AddComponent { name, group_id, .. }) = &outcome {
            if self.drag.active_group() == Some(*group_id) {
                self.drag.reset();
            }
            info!(name = name.as_str(), group_id:% = group_id; "component addition undone");
        }
        Ok(outcome)
    }

    /// Empties components, shapes, undo history and any drag in one step.
    pub fn clear(&mut self) {
        self.registry.clear();
        self.surface.clear();
        self.undo.clear();
        self.drag.reset();
        debug!("session cleared");
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) -> Option<GroupId> {
        self.drag.pointer_down(&self.surface, x, y)
    }

    pub fn pointer_move(&mut self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.drag.pointer_move(&mut self.surface, x, y)
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    /// JSON array of `{name, description}` records handed to the analysis process.
    pub fn analysis_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.registry.as_slice())
    }

    pub fn component_for(&self, group_id: GroupId) -> Option<&Component> {
        self.registry.get(group_id.index())
    }
}
