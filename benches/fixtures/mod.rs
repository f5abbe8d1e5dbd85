// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use threatsketch::model::EditorSession;

const NAMES: [&str; 6] = ["PLC", "HMI", "RTU", "Sensor", "Historian", "Gateway"];

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn components(self) -> usize {
        match self {
            Self::Small => 8,
            Self::Medium => 64,
            Self::Large => 512,
        }
    }
}

pub fn session(case: Case) -> EditorSession {
    let mut session = EditorSession::new();
    for idx in 0..case.components() {
        let name = NAMES[idx % NAMES.len()];
        session
            .add_component(name, &format!("bench component {idx:04}"))
            .expect("fixture component");
    }
    session
}

/// A report with `groups` headers of `findings` CWE lines each, plus noise lines.
pub fn report_text(groups: usize, findings: usize) -> String {
    let mut out = String::new();
    for group in 0..groups {
        out.push_str(&format!("Zone {group:03} Threats\n"));
        for finding in 0..findings {
            out.push_str(&format!("  CWE-{} finding {group}-{finding}\n", 100 + finding));
            if finding % 4 == 0 {
                out.push_str("\n-- reviewer note --\n");
            }
        }
    }
    out
}
