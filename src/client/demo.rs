// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::future::Future;

use super::{Backend, Fetched, PathQuery};
use crate::model::fixtures;
use crate::model::{
    GraphSnapshot, Job, NodeId, PathQueryResult, RouteResult, Strategy, TopoCheck,
};

/// In-process stand-in for the solver, answering from canned fixture data.
///
/// Strategy costs are recomputed per requested start node as the sum of the
/// canned leg walks, so the numbers shown always match the drawn route.
#[derive(Debug, Clone)]
pub struct DemoBackend {
    snapshot: GraphSnapshot,
    jobs: Vec<Job>,
    topology: TopoCheck,
    paths: BTreeMap<(NodeId, NodeId), Vec<NodeId>>,
    leg_weights: BTreeMap<(NodeId, NodeId), f64>,
}

impl DemoBackend {
    pub fn new() -> Self {
        let snapshot = fixtures::demo_snapshot();
        let mut leg_weights = BTreeMap::new();
        for row in &snapshot.adjacency {
            for neighbor in &row.neighbors {
                leg_weights
                    .entry((row.node, neighbor.to))
                    .or_insert(neighbor.weight);
            }
        }
        Self {
            snapshot,
            jobs: fixtures::demo_jobs(),
            topology: fixtures::demo_topology(),
            paths: fixtures::demo_paths(),
            leg_weights,
        }
    }

    fn path_between(&self, from: NodeId, to: NodeId) -> PathQueryResult {
        if from == to {
            return PathQueryResult::found(vec![from]);
        }
        match self.paths.get(&(from, to)) {
            Some(path) => PathQueryResult::found(path.clone()),
            None => PathQueryResult::unreachable(),
        }
    }

    fn walk_cost(&self, path: &[NodeId]) -> f64 {
        path.windows(2)
            .map(|pair| {
                self.leg_weights
                    .get(&(pair[0], pair[1]))
                    .copied()
                    .unwrap_or(0.0)
            })
            .sum()
    }

    fn route(&self, strategy: Strategy, start: NodeId) -> RouteResult {
        let job_order = fixtures::demo_strategy_order(strategy);
        let mut total_cost = 0.0;
        let mut at = start;
        for job_id in &job_order {
            let Some(node) = self
                .jobs
                .iter()
                .find(|job| job.id() == *job_id)
                .map(Job::node_id)
            else {
                continue;
            };
            if node != at {
                if let Some(path) = self.paths.get(&(at, node)) {
                    total_cost += self.walk_cost(path);
                }
                at = node;
            }
        }
        RouteResult {
            strategy,
            start_node: start,
            job_order,
            total_cost,
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PathQuery for DemoBackend {
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
    ) -> impl Future<Output = Fetched<PathQueryResult>> + Send {
        let result = self.path_between(from, to);
        async move { Ok(result) }
    }
}

impl Backend for DemoBackend {
    fn graph(&self) -> impl Future<Output = Fetched<GraphSnapshot>> + Send {
        let snapshot = self.snapshot.clone();
        async move { Ok(snapshot) }
    }

    fn jobs(&self) -> impl Future<Output = Fetched<Vec<Job>>> + Send {
        let jobs = self.jobs.clone();
        async move { Ok(jobs) }
    }

    fn topology(&self) -> impl Future<Output = Fetched<TopoCheck>> + Send {
        let topology = self.topology.clone();
        async move { Ok(topology) }
    }

    fn greedy(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send {
        let result = self.route(Strategy::Greedy, start);
        async move { Ok(result) }
    }

    fn optimal(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send {
        let result = self.route(Strategy::Optimal, start);
        async move { Ok(result) }
    }
}

#[cfg(test)]
mod tests {
    use super::DemoBackend;
    use crate::client::{Backend, PathQuery};
    use crate::model::{NodeId, Strategy};

    #[tokio::test]
    async fn demo_costs_are_leg_weight_sums() {
        let backend = DemoBackend::new();
        let greedy = backend.greedy(NodeId::new(1)).await.unwrap();
        let optimal = backend.optimal(NodeId::new(1)).await.unwrap();
        assert_eq!(greedy.strategy, Strategy::Greedy);
        assert_eq!(greedy.total_cost, 38.0);
        assert_eq!(optimal.total_cost, 36.0);
        assert!(optimal.total_cost <= greedy.total_cost);
    }

    #[tokio::test]
    async fn same_node_paths_are_single_point_walks() {
        let backend = DemoBackend::new();
        let result = backend
            .shortest_path(NodeId::new(3), NodeId::new(3))
            .await
            .unwrap();
        assert!(result.reachable);
        assert_eq!(result.path, Some(vec![NodeId::new(3)]));
    }

    #[tokio::test]
    async fn uncanned_pairs_report_unreachable() {
        let backend = DemoBackend::new();
        let result = backend
            .shortest_path(NodeId::new(2), NodeId::new(1))
            .await
            .unwrap();
        assert!(!result.reachable);
        assert_eq!(result.path, None);
    }

    #[tokio::test]
    async fn demo_graph_serves_eight_depots() {
        let backend = DemoBackend::new();
        let snapshot = backend.graph().await.unwrap();
        assert_eq!(snapshot.nodes.len(), 8);
        assert_eq!(backend.jobs().await.unwrap().len(), 4);
        assert!(!backend.topology().await.unwrap().has_cycle);
    }
}
