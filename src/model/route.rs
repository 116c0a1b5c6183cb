// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{JobId, NodeId};

/// One directed node-to-node traversal within a composed path.
pub type Hop = (NodeId, NodeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Greedy,
    Optimal,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Optimal => "optimal",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A strategy run as reported by the solver. `job_order` is the visitation
/// order; ids the local job set cannot resolve are tolerated and skipped
/// during composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub strategy: Strategy,
    pub start_node: NodeId,
    pub job_order: Vec<JobId>,
    pub total_cost: f64,
}

/// Solver answer for one pairwise shortest-path query. `reachable == false`
/// and an absent path both mean the leg cannot be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathQueryResult {
    pub reachable: bool,
    #[serde(default)]
    pub path: Option<Vec<NodeId>>,
}

impl PathQueryResult {
    pub fn found(path: Vec<NodeId>) -> Self {
        Self {
            reachable: true,
            path: Some(path),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            path: None,
        }
    }
}

/// The stitched route: a flat hop sequence in visitation order, plus the
/// diagnostics the status line reports. Recomputed per RouteResult and
/// replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedPath {
    hops: Vec<Hop>,
    skipped_jobs: Vec<JobId>,
    dropped_legs: usize,
}

impl ComposedPath {
    pub fn new(hops: Vec<Hop>, skipped_jobs: Vec<JobId>, dropped_legs: usize) -> Self {
        Self {
            hops,
            skipped_jobs,
            dropped_legs,
        }
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn skipped_jobs(&self) -> &[JobId] {
        &self.skipped_jobs
    }

    pub fn dropped_legs(&self) -> usize {
        self.dropped_legs
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// A finished strategy run: the solver's answer paired with the hop
/// sequence composed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRun {
    result: RouteResult,
    path: ComposedPath,
}

impl RouteRun {
    pub fn new(result: RouteResult, path: ComposedPath) -> Self {
        Self { result, path }
    }

    pub fn result(&self) -> &RouteResult {
        &self.result
    }

    pub fn path(&self) -> &ComposedPath {
        &self.path
    }

    pub fn strategy(&self) -> Strategy {
        self.result.strategy
    }
}
