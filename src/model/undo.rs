// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;
use thiserror::Error;

use super::component::ComponentRegistry;
use super::ids::GroupId;
use super::surface::DiagramSurface;

/// A reversible action, recorded with the exact positions it created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    AddComponent { name: SmolStr, registry_index: usize, group_id: GroupId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    NothingToUndo,
    Undone(UndoEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error(
        "undo target out of sync (component '{name}' at index {registry_index}, shape {group_id})"
    )]
    Desynchronized { name: SmolStr, registry_index: usize, group_id: GroupId },
}

/// Last-in-first-out history of component additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    entries: Vec<UndoEntry>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    /// Reverses the most recent entry against both the registry and the surface.
    ///
    /// Preconditions for both removals are checked first, so either both collections shrink
    /// or neither does.
    pub fn undo(
        &mut self,
        registry: &mut ComponentRegistry,
        surface: &mut DiagramSurface,
    ) -> Result<UndoOutcome, UndoError> {
        let Some(entry) = self.entries.pop() else {
            return Ok(UndoOutcome::NothingToUndo);
        };

        let UndoEntry::AddComponent { name, registry_index, group_id } = &entry;
        let index_matches =
            registry.get(*registry_index).is_some_and(|component| component.name() == name);
        let name_present = index_matches || registry.iter().any(|c| c.name() == name);
        if surface.last_id() != Some(*group_id) || !name_present {
            let err = UndoError::Desynchronized {
                name: name.clone(),
                registry_index: *registry_index,
                group_id: *group_id,
            };
            self.entries.push(entry);
            return Err(err);
        }

        if index_matches {
            registry.remove_at(*registry_index);
        } else {
            registry.remove_by_name(name);
        }
        surface.remove_last();

        Ok(UndoOutcome::Undone(entry))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
