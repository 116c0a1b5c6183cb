// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Solver capabilities.
//!
//! Six remote, fallible queries the dashboard consumes. Every failure mode
//! of a capability collapses into [`Unavailable`]; errors never cross this
//! boundary as panics or transport exceptions, so the core treats a broken
//! solver exactly like an empty one.

use std::fmt;
use std::future::Future;

use crate::model::{GraphSnapshot, Job, NodeId, PathQueryResult, RouteResult, TopoCheck};

pub mod demo;
pub mod protocol;
pub mod remote;

pub use demo::DemoBackend;
pub use remote::{RemoteBackend, RemoteError};

/// Outcome of one capability call.
pub type Fetched<T> = Result<T, Unavailable>;

/// The explicit sentinel for a capability that could not answer. The reason
/// is display text for the status line; callers must not branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver unavailable: {}", self.reason)
    }
}

impl std::error::Error for Unavailable {}

/// Pairwise shortest-path capability, the composer's only seam into the
/// solver. Kept separate from [`Backend`] so composition can be driven by
/// scripted lookups in tests.
pub trait PathQuery {
    fn shortest_path(
        &self,
        from: NodeId,
        to: NodeId,
    ) -> impl Future<Output = Fetched<PathQueryResult>> + Send;
}

/// The full solver surface the dashboard consumes.
pub trait Backend: PathQuery + Send + Sync {
    fn graph(&self) -> impl Future<Output = Fetched<GraphSnapshot>> + Send;

    fn jobs(&self) -> impl Future<Output = Fetched<Vec<Job>>> + Send;

    fn topology(&self) -> impl Future<Output = Fetched<TopoCheck>> + Send;

    fn greedy(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send;

    fn optimal(&self, start: NodeId) -> impl Future<Output = Fetched<RouteResult>> + Send;
}
