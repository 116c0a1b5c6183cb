// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canned depot-run data served by the in-process demo backend.
//!
//! The shortest-path table is consistent with the edge weights, so route
//! costs shown in demo mode always equal the sum of the drawn hops.

use std::collections::BTreeMap;

use super::graph::{AdjacencyRow, GraphSnapshot, Neighbor};
use super::ids::{JobId, NodeId};
use super::job::{Job, JobKind, TopoCheck};
use super::route::Strategy;

fn node(value: i64) -> NodeId {
    NodeId::new(value)
}

fn job(value: i64) -> JobId {
    JobId::new(value)
}

fn row(from: i64, neighbors: &[(i64, f64)]) -> AdjacencyRow {
    AdjacencyRow {
        node: node(from),
        neighbors: neighbors
            .iter()
            .map(|(to, weight)| Neighbor {
                to: node(*to),
                weight: *weight,
            })
            .collect(),
    }
}

/// Eight depots on a one-way ring with cross and return chords.
pub(crate) fn demo_snapshot() -> GraphSnapshot {
    GraphSnapshot {
        nodes: (1..=8).map(node).collect(),
        adjacency: vec![
            row(1, &[(2, 3.0), (5, 12.0)]),
            row(2, &[(3, 4.0), (6, 12.0)]),
            row(3, &[(4, 3.0), (7, 11.0)]),
            row(4, &[(5, 4.0), (8, 13.0)]),
            row(5, &[(6, 3.0), (2, 6.0)]),
            row(6, &[(7, 5.0), (3, 5.0)]),
            row(7, &[(8, 4.0), (4, 6.0)]),
            row(8, &[(1, 4.0), (5, 5.0)]),
        ],
    }
}

pub(crate) fn demo_jobs() -> Vec<Job> {
    vec![
        Job::new(job(1), JobKind::Pickup, node(3)),
        Job::new(job(2), JobKind::Dropoff, node(6)),
        Job::new(job(3), JobKind::Pickup, node(8)),
        Job::new(job(4), JobKind::Dropoff, node(4)),
    ]
}

/// The solver-side precedence (job 2 before job 4) is acyclic.
pub(crate) fn demo_topology() -> TopoCheck {
    TopoCheck {
        has_cycle: false,
        order: vec![job(1), job(2), job(3), job(4)],
    }
}

/// Visitation orders the demo solver reports. Greedy chases the nearest
/// admissible job; the optimal order accepts a longer first leg to avoid
/// greedy's detour back across the ring.
pub(crate) fn demo_strategy_order(strategy: Strategy) -> Vec<JobId> {
    match strategy {
        Strategy::Greedy => vec![job(1), job(2), job(4), job(3)],
        Strategy::Optimal => vec![job(2), job(1), job(4), job(3)],
    }
}

/// Pairwise shortest paths for every leg the demo strategies can request:
/// any start node to the two first-visit nodes, plus the fixed job-to-job
/// legs. Pairs outside the table are reported unreachable.
pub(crate) fn demo_paths() -> BTreeMap<(NodeId, NodeId), Vec<NodeId>> {
    let mut table = BTreeMap::new();
    let mut put = |from: i64, to: i64, path: &[i64]| {
        table.insert(
            (node(from), node(to)),
            path.iter().copied().map(node).collect::<Vec<_>>(),
        );
    };

    put(1, 3, &[1, 2, 3]);
    put(2, 3, &[2, 3]);
    put(4, 3, &[4, 5, 6, 3]);
    put(5, 3, &[5, 6, 3]);
    put(6, 3, &[6, 3]);
    put(7, 3, &[7, 8, 1, 2, 3]);
    put(8, 3, &[8, 1, 2, 3]);

    put(1, 6, &[1, 2, 6]);
    put(2, 6, &[2, 6]);
    put(3, 6, &[3, 4, 5, 6]);
    put(4, 6, &[4, 5, 6]);
    put(5, 6, &[5, 6]);
    put(7, 6, &[7, 8, 5, 6]);
    put(8, 6, &[8, 5, 6]);

    put(3, 4, &[3, 4]);
    put(6, 4, &[6, 3, 4]);
    put(4, 8, &[4, 8]);

    table
}
