// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::session::EditorSession;

fn session_from(components: &[(&str, &str)]) -> EditorSession {
    let mut session = EditorSession::new();
    for (name, description) in components {
        session.add_component(name, description).expect("fixture component");
    }
    session
}

pub(crate) fn control_cell_session() -> EditorSession {
    session_from(&[
        ("PLC", "Ladder logic controller for the filling line"),
        ("HMI", "Operator touch panel on the plant floor"),
        ("Sensor", "Level transmitter, 4-20mA"),
    ])
}

pub(crate) fn duplicate_sensor_session() -> EditorSession {
    session_from(&[
        ("Sensor", "Inlet pressure"),
        ("PLC", "Line controller"),
        ("Sensor", "Outlet pressure"),
    ])
}
