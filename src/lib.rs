// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threatsketch: a terminal threat-model diagram editor and CWE findings viewer.
//!
//! [`model::EditorSession`] owns the component registry, the diagram surface and undo history.
//! [`ops::apply_action`] is the single entry point the editor uses to change it. Analysis and
//! result viewing run as detached processes through [`launch::Launcher`].

pub mod config;
pub mod format;
pub mod launch;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
pub mod tui;
