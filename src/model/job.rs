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

/// A pickup/dropoff task pinned to exactly one node. Several jobs may share
/// a node; nothing here forbids or collapses that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    #[serde(rename = "type")]
    kind: JobKind,
    node_id: NodeId,
}

impl Job {
    pub fn new(id: JobId, kind: JobKind, node_id: NodeId) -> Self {
        Self { id, kind, node_id }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Pickup,
    Dropoff,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the solver's cycle/topology check over job precedences. A
/// cycle-free check is the gate for running strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoCheck {
    pub has_cycle: bool,
    pub order: Vec<JobId>,
}
