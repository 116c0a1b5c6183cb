// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::future::Future;

use hermod::client::{Fetched, PathQuery};
use hermod::model::{Job, JobId, JobKind, NodeId, PathQueryResult};

pub fn node_ids(count: usize) -> Vec<NodeId> {
    (1..=count as i64).map(NodeId::new).collect()
}

/// Jobs scattered over the ring with a fixed stride so neighbouring jobs
/// are several hops apart, alternating pickup and dropoff.
pub fn jobs(count: usize, node_count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| {
            let node = (i * 7) % node_count + 1;
            let kind = if i % 2 == 0 {
                JobKind::Pickup
            } else {
                JobKind::Dropoff
            };
            Job::new(JobId::new(i as i64 + 1), kind, NodeId::new(node as i64))
        })
        .collect()
}

pub fn job_order(count: usize) -> Vec<JobId> {
    (1..=count as i64).map(JobId::new).collect()
}

/// Answers every pairwise query with the one-way ring walk from `from` to
/// `to` (ascending ids, wrapping). Synchronous and allocation-bounded, so
/// compose benchmarks measure stitching rather than a solver.
pub struct RingPaths {
    node_count: usize,
}

impl RingPaths {
    pub fn new(node_count: usize) -> Self {
        Self { node_count }
    }

    fn walk(&self, from: NodeId, to: NodeId) -> Vec<NodeId> {
        let count = self.node_count as i64;
        let mut path = vec![from];
        let mut at = from.raw();
        while at != to.raw() {
            at = at % count + 1;
            path.push(NodeId::new(at));
        }
        path
    }
}

impl PathQuery for RingPaths {
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
    ) -> impl Future<Output = Fetched<PathQueryResult>> + Send {
        let result = PathQueryResult::found(self.walk(from, to));
        async move { Ok(result) }
    }
}
