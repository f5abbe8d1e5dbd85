// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use threatsketch::config::AppConfig;
use threatsketch::launch::{JobKind, RecordingLauncher};
use threatsketch::model::{ComponentDraft, DragState, EditorSession, GroupId, UndoOutcome};
use threatsketch::ops::{apply_action, Action, NoticeLevel};
use threatsketch::render::render_surface_text;

fn add(session: &mut EditorSession, name: &str, description: &str) -> GroupId {
    session.add_component(name, description).expect("valid component")
}

#[test]
fn registry_and_surface_stay_in_lockstep() {
    let mut session = EditorSession::new();
    for (idx, name) in ["PLC", "HMI", "Sensor", "Sensor", "RTU"].into_iter().enumerate() {
        let group_id = add(&mut session, name, "line 3");
        assert_eq!(group_id, GroupId::new(idx));
        assert_eq!(session.components().len(), session.surface().len());
        assert_eq!(session.surface().groups()[idx].rect().y1, 50 + 60 * idx as i32);
    }

    while let Ok(UndoOutcome::Undone(_)) = session.undo() {
        assert_eq!(session.components().len(), session.surface().len());
    }
    assert!(session.components().is_empty());
    assert_eq!(session.undo(), Ok(UndoOutcome::NothingToUndo));
}

#[rstest]
#[case("", "PLC", "")]
#[case("", "", "controller")]
#[case("", "   ", "controller")]
#[case("PLC", "Custom PLC", "controller")]
fn invalid_drafts_leave_session_untouched(
    #[case] selected: &str,
    #[case] custom: &str,
    #[case] description: &str,
) {
    let mut session = EditorSession::new();
    add(&mut session, "HMI", "panel");
    let before = session.clone();

    let mut launcher = RecordingLauncher::default();
    let notice = apply_action(
        &mut session,
        Action::AddComponent(ComponentDraft::new(selected, custom, description)),
        &AppConfig::default(),
        &mut launcher,
    );

    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(session, before);
}

#[test]
fn drag_then_undo_removes_moved_shape() {
    let mut session = EditorSession::new();
    add(&mut session, "PLC", "controller");
    add(&mut session, "HMI", "panel");

    assert_eq!(session.pointer_down(100, 130), Some(GroupId::new(1)));
    session.pointer_move(140, 150);
    assert_eq!(session.surface().groups()[1].rect().x1, 90);

    session.undo().expect("undo");
    assert_eq!(session.drag().state(), DragState::Idle);
    assert_eq!(session.surface().len(), 1);
    assert_eq!(session.pointer_move(300, 300), None);
}

#[test]
fn analysis_receives_every_component_in_order() {
    let mut session = EditorSession::new();
    add(&mut session, "Sensor", "Inlet pressure");
    add(&mut session, "Historian", "OSIsoft PI");

    let mut launcher = RecordingLauncher::default();
    let notice = apply_action(&mut session, Action::Analyze, &AppConfig::default(), &mut launcher);
    assert_eq!(notice.level, NoticeLevel::Info);

    let job = &launcher.launched[0];
    assert_eq!(job.kind, JobKind::Analysis);
    let payload: serde_json::Value =
        serde_json::from_str(job.args.last().expect("payload")).expect("json");
    assert_eq!(
        payload,
        serde_json::json!([
            {"name": "Sensor", "description": "Inlet pressure"},
            {"name": "Historian", "description": "OSIsoft PI"},
        ])
    );
}

#[test]
fn rendered_canvas_shows_stacked_boxes() {
    let mut session = EditorSession::new();
    add(&mut session, "PLC", "controller");
    add(&mut session, "HMI", "panel");

    let text = render_surface_text(session.surface(), 40, 20).expect("render");
    let label_rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| line.contains("PLC") || line.contains("HMI"))
        .map(|(row, _)| row)
        .collect::<Vec<_>>();
    assert_eq!(label_rows, [7, 13]);
}
