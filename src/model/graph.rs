// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{EdgeId, NodeId};
use super::job::Job;

/// A located graph node. Coordinates are immutable once assigned for the
/// lifetime of the snapshot that owns the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    x: f64,
    y: f64,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A directed weighted edge. Parallel edges over the same ordered pair are
/// kept as distinct entries, never merged; `weight` is a non-negative
/// traversal cost supplied by the solver and only ever displayed here.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    from_node: NodeId,
    to_node: NodeId,
    weight: f64,
}

impl Edge {
    pub fn new(id: EdgeId, from_node: NodeId, to_node: NodeId, weight: f64) -> Self {
        Self {
            id,
            from_node,
            to_node,
            weight,
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn from_node(&self) -> NodeId {
        self.from_node
    }

    pub fn to_node(&self) -> NodeId {
        self.to_node
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Expands adjacency rows into edges, synthesizing ids and numbering
    /// parallel edges in encounter order.
    pub fn from_adjacency(rows: &[AdjacencyRow]) -> Vec<Edge> {
        let mut seen: BTreeMap<(NodeId, NodeId), usize> = BTreeMap::new();
        let mut edges = Vec::new();
        for row in rows {
            for neighbor in &row.neighbors {
                let pair = (row.node, neighbor.to);
                let parallel_index = seen.entry(pair).or_insert(0);
                edges.push(Edge::new(
                    EdgeId::synthesized(row.node, neighbor.to, *parallel_index),
                    row.node,
                    neighbor.to,
                    neighbor.weight,
                ));
                *parallel_index += 1;
            }
        }
        edges
    }
}

/// Wire shape of the solver's graph snapshot: bare node ids plus an
/// adjacency listing. Coordinates are synthesized locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeId>,
    pub adjacency: Vec<AdjacencyRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyRow {
    pub node: NodeId,
    pub neighbors: Vec<Neighbor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub to: NodeId,
    pub weight: f64,
}

/// The hydrated snapshot the dashboard works against: located nodes,
/// synthesized edges, and the job list, all read-only after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    jobs: Vec<Job>,
    node_slots: BTreeMap<NodeId, usize>,
}

impl Dataset {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, jobs: Vec<Job>) -> Self {
        let node_slots = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id(), slot))
            .collect();
        Self {
            nodes,
            edges,
            jobs,
            node_slots,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_slots.get(&id).map(|slot| &self.nodes[*slot])
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
