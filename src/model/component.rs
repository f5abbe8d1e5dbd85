// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// A named, described system element of the threat model (e.g. a PLC).
///
/// Names are not unique; the registry keeps duplicates in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    name: SmolStr,
    description: String,
}

impl Component {
    pub fn new(name: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Raw form input for a new component.
///
/// The name comes from exactly one of two sources: a known-component dropdown or a free-text
/// entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentDraft {
    pub selected: String,
    pub custom: String,
    pub description: String,
}

impl ComponentDraft {
    pub fn new(
        selected: impl Into<String>,
        custom: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self { selected: selected.into(), custom: custom.into(), description: description.into() }
    }

    /// Resolves the component name from the two naming sources.
    pub fn resolve_name(&self) -> Result<&str, ValidationError> {
        let selected = self.selected.trim();
        let custom = self.custom.trim();
        match (selected.is_empty(), custom.is_empty()) {
            (false, false) => Err(ValidationError::AmbiguousName),
            (true, true) => Err(ValidationError::MissingName),
            (false, true) => Ok(selected),
            (true, false) => Ok(custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "Please either select a component from the dropdown or enter a custom component name, not both."
    )]
    AmbiguousName,
    #[error("Please select a component from the dropdown or enter a custom component name.")]
    MissingName,
    #[error("Please fill in both Component and Description.")]
    MissingDescription,
}

/// Ordered collection of components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    components: Vec<Component>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component and returns its index.
    ///
    /// Both fields are trimmed; an empty name or description is rejected without mutating the
    /// registry.
    pub fn add(&mut self, name: &str, description: &str) -> Result<usize, ValidationError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        self.components.push(Component::new(name, description));
        Ok(self.components.len() - 1)
    }

    pub fn add_draft(&mut self, draft: &ComponentDraft) -> Result<usize, ValidationError> {
        let name = draft.resolve_name()?;
        self.add(name, &draft.description)
    }

    /// Removes the most recently inserted component called `name`.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Component> {
        let index = self.components.iter().rposition(|component| component.name() == name)?;
        Some(self.components.remove(index))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Component> {
        (index < self.components.len()).then(|| self.components.remove(index))
    }

    pub fn clear(&mut self) {
        self.components.clear();
    }

    pub fn get(&self, index: usize) -> Option<&Component> {
        self.components.get(index)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn as_slice(&self) -> &[Component] {
        &self.components
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ComponentDraft, ComponentRegistry, ValidationError};

    #[rstest]
    #[case("", "x", ValidationError::MissingName)]
    #[case("x", "", ValidationError::MissingDescription)]
    #[case("", "", ValidationError::MissingName)]
    #[case("   ", "x", ValidationError::MissingName)]
    #[case("x", "\n\t", ValidationError::MissingDescription)]
    fn add_rejects_empty_fields(
        #[case] name: &str,
        #[case] description: &str,
        #[case] expected: ValidationError,
    ) {
        let mut registry = ComponentRegistry::new();
        registry.add("PLC", "ladder logic controller").expect("seed");

        assert_eq!(registry.add(name, description), Err(expected));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_returns_insertion_index_and_trims() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.add("PLC", "controller"), Ok(0));
        assert_eq!(registry.add(" HMI ", " operator panel \n"), Ok(1));

        let hmi = registry.get(1).expect("hmi");
        assert_eq!(hmi.name(), "HMI");
        assert_eq!(hmi.description(), "operator panel");
    }

    #[test]
    fn draft_with_both_name_sources_is_rejected() {
        let mut registry = ComponentRegistry::new();
        let draft = ComponentDraft::new("PLC", "My PLC", "controller");

        assert_eq!(registry.add_draft(&draft), Err(ValidationError::AmbiguousName));
        assert!(registry.is_empty());
    }

    #[test]
    fn draft_uses_whichever_name_source_is_set() {
        let mut registry = ComponentRegistry::new();
        registry.add_draft(&ComponentDraft::new("Sensor", "", "temp probe")).expect("dropdown");
        registry.add_draft(&ComponentDraft::new("", "Gateway", "edge box")).expect("custom");

        let names = registry.iter().map(|c| c.name()).collect::<Vec<_>>();
        assert_eq!(names, ["Sensor", "Gateway"]);
    }

    #[test]
    fn draft_without_any_name_is_rejected() {
        let draft = ComponentDraft::new("", "  ", "desc");
        assert_eq!(draft.resolve_name(), Err(ValidationError::MissingName));
    }

    #[test]
    fn remove_by_name_targets_last_occurrence() {
        let mut registry = ComponentRegistry::new();
        registry.add("Sensor", "first").expect("add");
        registry.add("PLC", "controller").expect("add");
        registry.add("Sensor", "second").expect("add");

        let removed = registry.remove_by_name("Sensor").expect("removed");
        assert_eq!(removed.description(), "second");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(0).map(|c| c.description()), Some("first"));
    }

    #[test]
    fn remove_by_name_is_noop_when_missing() {
        let mut registry = ComponentRegistry::new();
        registry.add("PLC", "controller").expect("add");

        assert!(registry.remove_by_name("RTU").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn component_serializes_as_name_description_record() {
        let mut registry = ComponentRegistry::new();
        registry.add("PLC", "controller").expect("add");

        let json = serde_json::to_string(registry.as_slice()).expect("json");
        assert_eq!(json, r#"[{"name":"PLC","description":"controller"}]"#);
    }
}
