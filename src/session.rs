// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Committed dashboard state.
//!
//! Everything the tabs render lives here, owned by the dashboard thread.
//! Background runs never touch it; their results are committed through the
//! setters once the event loop has decided they are still wanted.

use crate::model::{Dataset, NodeId, RouteRun, TopoCheck};
use crate::query::JobIndex;

/// Whether strategy runs may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGate {
    /// Topology checked and acyclic.
    Ready,
    /// No topology result committed yet.
    Unchecked,
    /// The precedence graph has a cycle; no order can satisfy it.
    Cycle,
}

/// Greedy and optimal runs from one comparison, kept side by side. A side
/// the solver could not produce stays empty.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    greedy: Option<RouteRun>,
    optimal: Option<RouteRun>,
}

impl Comparison {
    pub fn new(greedy: Option<RouteRun>, optimal: Option<RouteRun>) -> Self {
        Self { greedy, optimal }
    }

    pub fn greedy(&self) -> Option<&RouteRun> {
        self.greedy.as_ref()
    }

    pub fn optimal(&self) -> Option<&RouteRun> {
        self.optimal.as_ref()
    }

    /// Cost saved by the optimal order, when both sides ran.
    pub fn gap(&self) -> Option<f64> {
        match (&self.greedy, &self.optimal) {
            (Some(greedy), Some(optimal)) => {
                Some(greedy.result().total_cost - optimal.result().total_cost)
            }
            _ => None,
        }
    }
}

pub struct Session {
    dataset: Dataset,
    index: JobIndex,
    preferred_start: Option<NodeId>,
    start_node: Option<NodeId>,
    topo: Option<TopoCheck>,
    workday: Option<RouteRun>,
    comparison: Option<Comparison>,
}

impl Session {
    pub fn new(preferred_start: Option<NodeId>) -> Self {
        Self {
            dataset: Dataset::default(),
            index: JobIndex::default(),
            preferred_start,
            start_node: None,
            topo: None,
            workday: None,
            comparison: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &JobIndex {
        &self.index
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.start_node
    }

    pub fn topo(&self) -> Option<&TopoCheck> {
        self.topo.as_ref()
    }

    pub fn workday(&self) -> Option<&RouteRun> {
        self.workday.as_ref()
    }

    pub fn comparison(&self) -> Option<&Comparison> {
        self.comparison.as_ref()
    }

    /// Swaps in a freshly loaded dataset. Results computed against the old
    /// data are stale by definition and are dropped wholesale; the start
    /// selection survives when its node still exists.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.index = JobIndex::build(dataset.jobs());
        let wanted = self.start_node.or(self.preferred_start);
        self.start_node = choose_start(&dataset, wanted);
        self.dataset = dataset;
        self.topo = None;
        self.workday = None;
        self.comparison = None;
    }

    /// Moves the start selection through the dataset's node order, wrapping
    /// at both ends. Committed runs keep the start they were computed for.
    pub fn cycle_start_node(&mut self, step: isize) -> Option<NodeId> {
        let nodes = self.dataset.nodes();
        if nodes.is_empty() {
            return None;
        }
        let current = self.start_node?;
        let position = nodes
            .iter()
            .position(|node| node.id() == current)
            .unwrap_or(0);
        let next = (position as isize + step).rem_euclid(nodes.len() as isize) as usize;
        self.start_node = Some(nodes[next].id());
        self.start_node
    }

    pub fn route_gate(&self) -> RouteGate {
        match &self.topo {
            None => RouteGate::Unchecked,
            Some(topo) if topo.has_cycle => RouteGate::Cycle,
            Some(_) => RouteGate::Ready,
        }
    }

    pub fn set_topology(&mut self, topo: Option<TopoCheck>) {
        self.topo = topo;
    }

    pub fn set_workday(&mut self, run: Option<RouteRun>) {
        self.workday = run;
    }

    pub fn set_comparison(&mut self, comparison: Option<Comparison>) {
        self.comparison = comparison;
    }
}

fn choose_start(dataset: &Dataset, wanted: Option<NodeId>) -> Option<NodeId> {
    let nodes = dataset.nodes();
    if nodes.is_empty() {
        return None;
    }
    match wanted {
        Some(id) if dataset.node(id).is_some() => Some(id),
        _ => Some(nodes[0].id()),
    }
}
