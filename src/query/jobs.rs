// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{Job, JobId, NodeId};

/// Two-way job/node lookup built once per dataset snapshot.
///
/// `node_of` answers the composer's "where does this job live" question
/// with an explicit absence; `jobs_at` keeps every colocated job so the
/// overlay can report multiplicity instead of collapsing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobIndex {
    by_job: BTreeMap<JobId, NodeId>,
    by_node: BTreeMap<NodeId, Vec<Job>>,
}

impl JobIndex {
    pub fn build(jobs: &[Job]) -> Self {
        let mut by_job = BTreeMap::new();
        let mut by_node: BTreeMap<NodeId, Vec<Job>> = BTreeMap::new();
        for job in jobs {
            by_job.insert(job.id(), job.node_id());
            by_node.entry(job.node_id()).or_default().push(job.clone());
        }
        Self { by_job, by_node }
    }

    pub fn node_of(&self, job: JobId) -> Option<NodeId> {
        self.by_job.get(&job).copied()
    }

    pub fn jobs_at(&self, node: NodeId) -> &[Job] {
        self.by_node.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_job_at(&self, node: NodeId) -> bool {
        !self.jobs_at(node).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.by_job.is_empty()
    }
}
