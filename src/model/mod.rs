// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Diagram state model.
//!
//! An [`EditorSession`] owns the component registry, the diagram surface that holds one shape
//! group per component, the undo history and the pointer-drag state machine.

pub mod component;
pub mod drag;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod session;
pub mod surface;
pub mod undo;

pub use component::{Component, ComponentDraft, ComponentRegistry, ValidationError};
pub use drag::{DragController, DragState};
pub use ids::GroupId;
pub use session::EditorSession;
pub use surface::{DiagramSurface, Primitive, Rect, ShapeGroup};
pub use undo::{UndoEntry, UndoError, UndoOutcome, UndoStack};
