// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threatsketch-Proprietary
//
// All rights reserved.
//
// This file is part of Threatsketch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use threatsketch::model::EditorSession;
use threatsketch::render::render_surface;

mod fixtures;

use fixtures::Case;

// Group names (`session.*`) and case ids are kept stable so results stay comparable.
fn benches_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session.add_undo");
    for case in [Case::Small, Case::Medium, Case::Large] {
        group.throughput(Throughput::Elements(case.components() as u64));
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let mut session = EditorSession::new();
                for idx in 0..case.components() {
                    session.add_component(black_box("Sensor"), black_box("bench")).expect("add");
                    if idx % 3 == 2 {
                        session.undo().expect("undo");
                    }
                }
                black_box(session.components().len())
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("session.drag");
    for case in [Case::Small, Case::Large] {
        group.bench_function(case.id(), |b| {
            b.iter_batched(
                || fixtures::session(case),
                |mut session| {
                    session.pointer_down(60, 60);
                    for step in 1..=50 {
                        session.pointer_move(60 + step * 3, 60 + step * 2);
                    }
                    session.pointer_up();
                    black_box(session.surface().groups()[0].rect())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let mut group = c.benchmark_group("session.render");
    for case in [Case::Small, Case::Medium] {
        let session = fixtures::session(case);
        group.bench_function(case.id(), |b| {
            b.iter(|| {
                let render = render_surface(black_box(session.surface()), 160, 48).expect("render");
                black_box(render.bounds.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benches_session);
criterion_main!(benches);
