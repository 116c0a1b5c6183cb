// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Route path composition.
//!
//! Stitches a strategy's job-visitation order into one flat hop sequence by
//! querying the solver for each consecutive leg, strictly in order, one
//! result consumed before the next query is issued. Broken legs and foreign
//! job ids degrade to omission; an empty composition is a valid outcome.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::client::PathQuery;
use crate::model::{ComposedPath, Hop, JobId, NodeId};
use crate::query::JobIndex;

/// Marks one composition as belonging to a specific user action. The shared
/// counter advances whenever a newer action starts; a stale guard tells the
/// composer to abandon its remaining queries.
#[derive(Debug, Clone)]
pub struct RunGuard {
    seq: u64,
    current: Arc<AtomicU64>,
}

impl RunGuard {
    pub fn new(seq: u64, current: Arc<AtomicU64>) -> Self {
        Self { seq, current }
    }

    /// A guard with its own counter, for callers that never supersede.
    pub fn detached() -> Self {
        Self::new(0, Arc::new(AtomicU64::new(0)))
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.seq
    }
}

/// Returned when a composition was abandoned because a newer run started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superseded;

impl fmt::Display for Superseded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("superseded by a newer run")
    }
}

impl std::error::Error for Superseded {}

/// Resolves the node-visitation sequence: the start node, then each
/// resolvable job's node in order. Unresolvable ids are skipped and
/// reported back, never fatal.
pub fn visitation_sequence(
    start: NodeId,
    job_order: &[JobId],
    index: &JobIndex,
) -> (Vec<NodeId>, Vec<JobId>) {
    let mut sequence = Vec::with_capacity(job_order.len() + 1);
    sequence.push(start);
    let mut skipped = Vec::new();
    for job_id in job_order {
        match index.node_of(*job_id) {
            Some(node) => sequence.push(node),
            None => skipped.push(*job_id),
        }
    }
    (sequence, skipped)
}

/// Expands one solver path into consecutive directed hops.
pub fn leg_hops(path: &[NodeId]) -> impl Iterator<Item = Hop> + '_ {
    path.windows(2).map(|pair| (pair[0], pair[1]))
}

/// Composes the full route for one strategy run.
///
/// Revisited nodes produce repeated hops by design: returning to a hub must
/// read as two traversals, so no deduplication or reordering happens here.
pub async fn compose_route<Q: PathQuery>(
    start: NodeId,
    job_order: &[JobId],
    index: &JobIndex,
    query: &Q,
    guard: &RunGuard,
) -> Result<ComposedPath, Superseded> {
    let (sequence, skipped_jobs) = visitation_sequence(start, job_order, index);
    let mut hops: Vec<Hop> = Vec::new();
    let mut dropped_legs = 0;

    for pair in sequence.windows(2) {
        if !guard.is_current() {
            return Err(Superseded);
        }
        let leg = match query.shortest_path(pair[0], pair[1]).await {
            Ok(result) => result,
            Err(_) => {
                dropped_legs += 1;
                continue;
            }
        };
        if !leg.reachable {
            dropped_legs += 1;
            continue;
        }
        let Some(path) = leg.path else {
            dropped_legs += 1;
            continue;
        };
        hops.extend(leg_hops(&path));
    }

    Ok(ComposedPath::new(hops, skipped_jobs, dropped_legs))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use super::{compose_route, leg_hops, visitation_sequence, RunGuard, Superseded};
    use crate::client::{Fetched, PathQuery, Unavailable};
    use crate::model::{Hop, Job, JobId, JobKind, NodeId, PathQueryResult};
    use crate::query::JobIndex;

    fn n(value: i64) -> NodeId {
        NodeId::new(value)
    }

    fn j(value: i64) -> JobId {
        JobId::new(value)
    }

    /// Scripted pairwise lookups with a call log; unscripted pairs answer
    /// with the unavailable sentinel.
    struct ScriptedPaths {
        answers: BTreeMap<(NodeId, NodeId), PathQueryResult>,
        log: Mutex<Vec<Hop>>,
        invalidates: Option<Arc<AtomicU64>>,
    }

    impl ScriptedPaths {
        fn new(answers: &[((i64, i64), PathQueryResult)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|((from, to), result)| ((n(*from), n(*to)), result.clone()))
                    .collect(),
                log: Mutex::new(Vec::new()),
                invalidates: None,
            }
        }

        fn found(pairs: &[((i64, i64), &[i64])]) -> Self {
            Self::new(
                &pairs
                    .iter()
                    .map(|((from, to), path)| {
                        (
                            (*from, *to),
                            PathQueryResult::found(path.iter().copied().map(n).collect()),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        }

        fn invalidating(mut self, counter: Arc<AtomicU64>) -> Self {
            self.invalidates = Some(counter);
            self
        }

        fn log(&self) -> Vec<Hop> {
            self.log.lock().unwrap().clone()
        }
    }

    impl PathQuery for ScriptedPaths {
        fn shortest_path(
            &self,
            from: NodeId,
            to: NodeId,
        ) -> impl Future<Output = Fetched<PathQueryResult>> + Send {
            self.log.lock().unwrap().push((from, to));
            if let Some(counter) = &self.invalidates {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            let answer = self.answers.get(&(from, to)).cloned();
            async move { answer.ok_or_else(|| Unavailable::new("pair not scripted")) }
        }
    }

    fn triangle_index() -> JobIndex {
        JobIndex::build(&[
            Job::new(j(1), JobKind::Pickup, n(2)),
            Job::new(j(2), JobKind::Dropoff, n(3)),
        ])
    }

    #[test]
    fn visitation_starts_at_start_and_skips_foreign_jobs() {
        let index = triangle_index();
        let (sequence, skipped) = visitation_sequence(n(1), &[j(1), j(99), j(2)], &index);
        assert_eq!(sequence, vec![n(1), n(2), n(3)]);
        assert_eq!(skipped, vec![j(99)]);
    }

    #[test]
    fn leg_hops_expand_multi_node_paths() {
        let path = vec![n(1), n(4), n(2)];
        let hops: Vec<Hop> = leg_hops(&path).collect();
        assert_eq!(hops, vec![(n(1), n(4)), (n(4), n(2))]);
        assert_eq!(leg_hops(&[n(7)]).count(), 0);
    }

    #[tokio::test]
    async fn triangle_route_stitches_both_direct_legs() {
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2]), ((2, 3), &[2, 3])]);
        let composed = compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(composed.hops(), &[(n(1), n(2)), (n(2), n(3))]);
        assert_eq!(composed.dropped_legs(), 0);
        assert!(composed.skipped_jobs().is_empty());
    }

    #[tokio::test]
    async fn unreachable_leg_drops_only_itself() {
        let paths = ScriptedPaths::new(&[
            ((1, 2), PathQueryResult::found(vec![n(1), n(2)])),
            ((2, 3), PathQueryResult::unreachable()),
        ]);
        let composed = compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(composed.hops(), &[(n(1), n(2))]);
        assert_eq!(composed.dropped_legs(), 1);
    }

    #[tokio::test]
    async fn unavailable_leg_is_dropped_and_counted() {
        // (2, 3) is not scripted, so the capability itself reports unavailable.
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2])]);
        let composed = compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(composed.hops(), &[(n(1), n(2))]);
        assert_eq!(composed.dropped_legs(), 1);
    }

    #[tokio::test]
    async fn reachable_with_absent_path_is_dropped() {
        let paths = ScriptedPaths::new(&[
            (
                (1, 2),
                PathQueryResult {
                    reachable: true,
                    path: None,
                },
            ),
            ((2, 3), PathQueryResult::found(vec![n(2), n(3)])),
        ]);
        let composed = compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(composed.hops(), &[(n(2), n(3))]);
        assert_eq!(composed.dropped_legs(), 1);
    }

    #[tokio::test]
    async fn foreign_job_does_not_break_later_legs() {
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2]), ((2, 3), &[2, 3])]);
        let composed = compose_route(
            n(1),
            &[j(1), j(42), j(2)],
            &triangle_index(),
            &paths,
            &RunGuard::detached(),
        )
        .await
        .unwrap();
        assert_eq!(composed.hops(), &[(n(1), n(2)), (n(2), n(3))]);
        assert_eq!(composed.skipped_jobs(), &[j(42)]);
    }

    #[tokio::test]
    async fn queries_run_in_visitation_order_one_at_a_time() {
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2]), ((2, 3), &[2, 3])]);
        compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(paths.log(), vec![(n(1), n(2)), (n(2), n(3))]);
    }

    #[tokio::test]
    async fn revisited_nodes_keep_repeated_hops() {
        let index = JobIndex::build(&[
            Job::new(j(1), JobKind::Pickup, n(2)),
            Job::new(j(2), JobKind::Dropoff, n(1)),
            Job::new(j(3), JobKind::Pickup, n(2)),
        ]);
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2]), ((2, 1), &[2, 1])]);
        let composed = compose_route(n(1), &[j(1), j(2), j(3)], &index, &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert_eq!(
            composed.hops(),
            &[(n(1), n(2)), (n(2), n(1)), (n(1), n(2))]
        );
    }

    #[tokio::test]
    async fn empty_order_composes_an_empty_path() {
        let paths = ScriptedPaths::found(&[]);
        let composed = compose_route(n(1), &[], &triangle_index(), &paths, &RunGuard::detached())
            .await
            .unwrap();
        assert!(composed.is_empty());
        assert!(paths.log().is_empty());
    }

    #[tokio::test]
    async fn superseded_run_abandons_remaining_queries() {
        let current = Arc::new(AtomicU64::new(0));
        let guard = RunGuard::new(0, Arc::clone(&current));
        let paths = ScriptedPaths::found(&[((1, 2), &[1, 2]), ((2, 3), &[2, 3])])
            .invalidating(Arc::clone(&current));

        let outcome =
            compose_route(n(1), &[j(1), j(2)], &triangle_index(), &paths, &guard).await;
        assert_eq!(outcome, Err(Superseded));
        assert_eq!(paths.log().len(), 1);
    }

    #[test]
    fn run_guard_tracks_the_shared_counter() {
        let current = Arc::new(AtomicU64::new(3));
        let guard = RunGuard::new(3, Arc::clone(&current));
        assert!(guard.is_current());
        current.fetch_add(1, Ordering::SeqCst);
        assert!(!guard.is_current());
    }
}
