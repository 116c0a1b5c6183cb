// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model and solver wire types.
//!
//! A dataset snapshot holds located nodes, directed weighted edges, and the
//! job list; strategy results and pairwise path answers arrive separately.

pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod job;
pub mod route;

pub use graph::{AdjacencyRow, Dataset, Edge, GraphSnapshot, Neighbor, Node};
pub use ids::{EdgeId, EdgeIdError, Id, JobId, NodeId};
pub use job::{Job, JobKind, TopoCheck};
pub use route::{ComposedPath, Hop, PathQueryResult, RouteResult, RouteRun, Strategy};
