// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Background solver conversations.
//!
//! The dashboard thread never talks to the solver directly: it asks a
//! [`Pipelines`] handle to start a run, keeps polling the terminal, and
//! drains finished work from the event channel. Every run carries the
//! generation counter's value at launch; a run that is no longer current
//! at send time keeps its result to itself.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::{Backend, Fetched};
use crate::compose::{compose_route, RunGuard, Superseded};
use crate::layout::layout_circle;
use crate::model::{Dataset, Edge, GraphSnapshot, NodeId, RouteRun, Strategy, TopoCheck};
use crate::query::JobIndex;

/// One finished background run, tagged with the generation that started it.
#[derive(Debug)]
pub enum PipelineEvent {
    DatasetLoaded {
        seq: u64,
        dataset: Dataset,
        notices: Vec<String>,
    },
    TopoChecked {
        seq: u64,
        outcome: Fetched<TopoCheck>,
    },
    StrategyComputed {
        seq: u64,
        strategy: Strategy,
        outcome: Fetched<RouteRun>,
    },
    ComparisonComputed {
        seq: u64,
        greedy: Fetched<RouteRun>,
        optimal: Fetched<RouteRun>,
    },
}

impl PipelineEvent {
    pub fn seq(&self) -> u64 {
        match self {
            Self::DatasetLoaded { seq, .. }
            | Self::TopoChecked { seq, .. }
            | Self::StrategyComputed { seq, .. }
            | Self::ComparisonComputed { seq, .. } => *seq,
        }
    }
}

/// Launches solver work onto the runtime and reports it back over an
/// unbounded channel. Cloning is deliberately not offered; the dashboard
/// thread is the only launcher.
pub struct Pipelines<B: Backend + 'static> {
    backend: Arc<B>,
    handle: Handle,
    tx: UnboundedSender<PipelineEvent>,
    current: Arc<AtomicU64>,
}

impl<B: Backend + 'static> Pipelines<B> {
    pub fn new(backend: Arc<B>, handle: Handle) -> (Self, UnboundedReceiver<PipelineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let pipelines = Self {
            backend,
            handle,
            tx,
            current: Arc::new(AtomicU64::new(0)),
        };
        (pipelines, rx)
    }

    pub fn current_seq(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Marks every in-flight run stale without starting a new one. Used when
    /// the start node changes and pending results would answer a question
    /// the user is no longer asking.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    fn begin_run(&self) -> RunGuard {
        let seq = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RunGuard::new(seq, Arc::clone(&self.current))
    }

    /// Fetches the graph snapshot and job list, lays the depots out on the
    /// ring, and reports the hydrated dataset. Either fetch degrading to
    /// unavailable yields an empty half plus a notice, never a failure.
    pub fn load_dataset(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let guard = self.begin_run();
        self.handle.spawn(async move {
            let mut notices = Vec::new();
            let snapshot = match backend.graph().await {
                Ok(snapshot) => snapshot,
                Err(unavailable) => {
                    notices.push(format!("graph fetch failed: {}", unavailable.reason()));
                    GraphSnapshot::default()
                }
            };
            let jobs = match backend.jobs().await {
                Ok(jobs) => jobs,
                Err(unavailable) => {
                    notices.push(format!("job fetch failed: {}", unavailable.reason()));
                    Vec::new()
                }
            };
            let dataset = Dataset::new(
                layout_circle(&snapshot.nodes),
                Edge::from_adjacency(&snapshot.adjacency),
                jobs,
            );
            if guard.is_current() {
                let _ = tx.send(PipelineEvent::DatasetLoaded {
                    seq: guard.seq(),
                    dataset,
                    notices,
                });
            }
        });
    }

    pub fn check_topology(&self) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let guard = self.begin_run();
        self.handle.spawn(async move {
            let outcome = backend.topology().await;
            if guard.is_current() {
                let _ = tx.send(PipelineEvent::TopoChecked {
                    seq: guard.seq(),
                    outcome,
                });
            }
        });
    }

    /// Runs one strategy and composes its drawable path.
    pub fn run_strategy(&self, strategy: Strategy, start: NodeId, index: JobIndex) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let guard = self.begin_run();
        self.handle.spawn(async move {
            let outcome = match run_one(backend.as_ref(), strategy, start, &index, &guard).await {
                Ok(outcome) => outcome,
                Err(Superseded) => return,
            };
            if guard.is_current() {
                let _ = tx.send(PipelineEvent::StrategyComputed {
                    seq: guard.seq(),
                    strategy,
                    outcome,
                });
            }
        });
    }

    /// Runs greedy then optimal under a single generation so the comparison
    /// lands as one event or not at all.
    pub fn run_comparison(&self, start: NodeId, index: JobIndex) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let guard = self.begin_run();
        self.handle.spawn(async move {
            let greedy = match run_one(backend.as_ref(), Strategy::Greedy, start, &index, &guard).await
            {
                Ok(outcome) => outcome,
                Err(Superseded) => return,
            };
            let optimal =
                match run_one(backend.as_ref(), Strategy::Optimal, start, &index, &guard).await {
                    Ok(outcome) => outcome,
                    Err(Superseded) => return,
                };
            if guard.is_current() {
                let _ = tx.send(PipelineEvent::ComparisonComputed {
                    seq: guard.seq(),
                    greedy,
                    optimal,
                });
            }
        });
    }
}

async fn run_one<B: Backend>(
    backend: &B,
    strategy: Strategy,
    start: NodeId,
    index: &JobIndex,
    guard: &RunGuard,
) -> Result<Fetched<RouteRun>, Superseded> {
    let result = match strategy {
        Strategy::Greedy => backend.greedy(start).await,
        Strategy::Optimal => backend.optimal(start).await,
    };
    match result {
        Ok(result) => {
            let path =
                compose_route(result.start_node, &result.job_order, index, backend, guard).await?;
            Ok(Ok(RouteRun::new(result, path)))
        }
        Err(unavailable) => Ok(Err(unavailable)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::runtime::Handle;
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::{PipelineEvent, Pipelines};
    use crate::client::DemoBackend;
    use crate::model::{fixtures, NodeId, Strategy};
    use crate::query::JobIndex;

    fn demo_pipelines() -> (Pipelines<DemoBackend>, UnboundedReceiver<PipelineEvent>) {
        Pipelines::new(Arc::new(DemoBackend::new()), Handle::current())
    }

    fn demo_index() -> JobIndex {
        JobIndex::build(&fixtures::demo_jobs())
    }

    #[tokio::test]
    async fn dataset_load_reports_located_nodes_and_jobs() {
        let (pipelines, mut rx) = demo_pipelines();
        pipelines.load_dataset();
        match rx.recv().await.unwrap() {
            PipelineEvent::DatasetLoaded {
                seq,
                dataset,
                notices,
            } => {
                assert_eq!(seq, 1);
                assert_eq!(dataset.nodes().len(), 8);
                assert_eq!(dataset.edges().len(), 16);
                assert_eq!(dataset.jobs().len(), 4);
                assert!(notices.is_empty());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn greedy_run_composes_the_expected_hops() {
        let (pipelines, mut rx) = demo_pipelines();
        pipelines.run_strategy(Strategy::Greedy, NodeId::new(1), demo_index());
        match rx.recv().await.unwrap() {
            PipelineEvent::StrategyComputed {
                strategy, outcome, ..
            } => {
                assert_eq!(strategy, Strategy::Greedy);
                let run = outcome.unwrap();
                assert_eq!(run.result().total_cost, 38.0);
                assert_eq!(run.path().hops().len(), 8);
                assert_eq!(
                    run.path().hops()[0],
                    (NodeId::new(1), NodeId::new(2))
                );
                assert_eq!(run.path().dropped_legs(), 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn comparison_lands_as_a_single_event() {
        let (pipelines, mut rx) = demo_pipelines();
        pipelines.run_comparison(NodeId::new(1), demo_index());
        match rx.recv().await.unwrap() {
            PipelineEvent::ComparisonComputed {
                greedy, optimal, ..
            } => {
                let greedy = greedy.unwrap();
                let optimal = optimal.unwrap();
                assert_eq!(greedy.result().total_cost, 38.0);
                assert_eq!(optimal.result().total_cost, 36.0);
                assert_eq!(optimal.path().hops().len(), 5);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn topology_outcome_carries_the_job_order() {
        let (pipelines, mut rx) = demo_pipelines();
        pipelines.check_topology();
        match rx.recv().await.unwrap() {
            PipelineEvent::TopoChecked { outcome, .. } => {
                let topo = outcome.unwrap();
                assert!(!topo.has_cycle);
                assert_eq!(topo.order.len(), 4);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn superseded_load_keeps_its_result_to_itself() {
        let (pipelines, mut rx) = demo_pipelines();
        // Both runs are queued before either task polls; the first is stale
        // by the time it would report.
        pipelines.load_dataset();
        pipelines.load_dataset();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.seq(), 2);
        assert!(rx.try_recv().is_err());
        assert_eq!(pipelines.current_seq(), 2);
    }

    #[tokio::test]
    async fn invalidate_bumps_the_generation() {
        let (pipelines, _rx) = demo_pipelines();
        assert_eq!(pipelines.current_seq(), 0);
        pipelines.invalidate();
        assert_eq!(pipelines.current_seq(), 1);
    }
}
