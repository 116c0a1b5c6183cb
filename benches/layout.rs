// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use hermod::layout::{fit_viewport, layout_circle};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group names in this file: `layout.circle`, `layout.viewport`
// - Case IDs (the string after the `/`) must remain stable across refactors
//   so results stay comparable over time (e.g. `small`, `medium`, `large`).
fn benches_layout(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("layout.circle");

        for (case_id, count) in [("small", 8usize), ("medium", 128), ("large", 2048)] {
            let ids = fixtures::node_ids(count);
            group.throughput(Throughput::Elements(count as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let nodes = layout_circle(black_box(&ids));
                    black_box(nodes.len())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.viewport");

        for (case_id, count) in [("small", 8usize), ("medium", 128), ("large", 2048)] {
            let nodes = layout_circle(&fixtures::node_ids(count));
            group.throughput(Throughput::Elements(count as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let viewport = fit_viewport(black_box(&nodes), 60.0).expect("viewport");
                    black_box(viewport.width() + viewport.height())
                })
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
