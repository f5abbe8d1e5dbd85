// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threat model files.
//!
//! Models are addressed as `.json` files. Reading and writing model contents is not
//! implemented yet; open/save only resolve the target path.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub const MODEL_EXTENSION: &str = "json";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelPathError {
    #[error("no model file selected")]
    Empty,
    #[error("model files must use the .json extension (got {})", .0.display())]
    WrongExtension(PathBuf),
}

/// Resolves user input into a model file path, adding `.json` when no extension is given.
pub fn resolve_model_path(input: &str) -> Result<PathBuf, ModelPathError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ModelPathError::Empty);
    }

    let path = Path::new(input);
    match path.extension() {
        None => Ok(path.with_extension(MODEL_EXTENSION)),
        Some(ext) if ext.eq_ignore_ascii_case(MODEL_EXTENSION) => Ok(path.to_path_buf()),
        Some(_) => Err(ModelPathError::WrongExtension(path.to_path_buf())),
    }
}
