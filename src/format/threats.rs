// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threat findings report.
//!
//! Plain text, one item per line. A line containing `Threats` opens a group titled by that
//! (trimmed) line; following lines starting with `CWE-` are the group's findings until the next
//! header. Everything else is ignored. There is no escaping and no nesting.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use memchr::memmem;
use thiserror::Error;

const GROUP_MARKER: &str = "Threats";
const FINDING_PREFIX: &str = "CWE-";

/// One report tab: a header line and the findings listed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportGroup<'a> {
    pub title: &'a str,
    pub findings: &'a [String],
}

impl ReportGroup<'_> {
    /// Title, an underline of matching width, then one finding per line.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.title.len() * 2 + self.findings.len() * 10);
        out.push_str(self.title);
        out.push('\n');
        out.push_str(&"-".repeat(self.title.chars().count()));
        out.push('\n');
        for finding in self.findings {
            out.push_str(finding);
            out.push('\n');
        }
        out
    }
}

/// Findings grouped by header, in first-seen header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportGroups {
    groups: IndexMap<String, Vec<String>>,
}

impl ReportGroups {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.groups.get(title).map(Vec::as_slice)
    }

    pub fn group(&self, index: usize) -> Option<ReportGroup<'_>> {
        self.groups
            .get_index(index)
            .map(|(title, findings)| ReportGroup { title, findings })
    }

    pub fn iter(&self) -> impl Iterator<Item = ReportGroup<'_>> {
        self.groups.iter().map(|(title, findings)| ReportGroup { title, findings })
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no threat data file selected")]
    NoData,
    #[error("failed to read threat data from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn parse_threat_report(input: &str) -> ReportGroups {
    parse_threat_lines(input.lines())
}

pub fn parse_threat_lines<I, S>(lines: I) -> ReportGroups
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let marker = memmem::Finder::new(GROUP_MARKER);
    let mut groups = IndexMap::<String, Vec<String>>::new();
    let mut current: Option<usize> = None;

    for raw_line in lines {
        let line = raw_line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if marker.find(line.as_bytes()).is_some() {
            // A repeated header keeps its tab position but starts over.
            let (index, _) = groups.insert_full(line.to_owned(), Vec::new());
            current = Some(index);
            continue;
        }

        if !line.starts_with(FINDING_PREFIX) {
            continue;
        }
        if let Some((_, findings)) = current.and_then(|index| groups.get_index_mut(index)) {
            findings.push(line.to_owned());
        }
    }

    ReportGroups { groups }
}

/// Reads and parses a report file.
///
/// `None` means the user picked nothing, which is reported as [`ReportError::NoData`]. A file
/// that reads fine but has no headers is an empty, valid result.
pub fn load_threat_report(path: Option<&Path>) -> Result<ReportGroups, ReportError> {
    let Some(path) = path else {
        return Err(ReportError::NoData);
    };

    let content = fs::read_to_string(path)
        .map_err(|source| ReportError::Read { path: path.to_path_buf(), source })?;
    let groups = parse_threat_report(&content);
    debug!(path = path.display().to_string(), groups = groups.len(); "threat report loaded");
    Ok(groups)
}
