// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats consumed by the viewer.
//!
//! Currently this module only covers the line-oriented threat findings report.

pub mod threats;

pub use threats::{
    load_threat_report, parse_threat_lines, parse_threat_report, ReportError, ReportGroup,
    ReportGroups,
};
