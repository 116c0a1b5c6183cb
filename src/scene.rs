// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! What the map renderer consumes.
//!
//! A [`Scene`] borrows everything from the committed session state; building
//! one allocates nothing. No scene exists for an empty dataset, which is the
//! renderer's cue to show the placeholder instead.

use crate::layout::{fit_viewport, Viewport};
use crate::model::{Edge, Hop, Job, Node, Strategy};
use crate::query::JobIndex;
use crate::session::Session;

/// Palette role the highlighted route is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyTint {
    #[default]
    Neutral,
    Greedy,
    Optimal,
}

impl StrategyTint {
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Greedy => Self::Greedy,
            Strategy::Optimal => Self::Optimal,
        }
    }
}

/// One tab's worth of drawable map state.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub path_edges: &'a [Hop],
    pub active_jobs: &'a [Job],
    pub index: &'a JobIndex,
    pub viewport: Viewport,
    pub tint: StrategyTint,
}

impl<'a> Scene<'a> {
    /// Assembles the scene for the current dataset, or nothing when there
    /// are no depots to frame.
    pub fn compose(
        session: &'a Session,
        path_edges: &'a [Hop],
        tint: StrategyTint,
        padding: f64,
    ) -> Option<Self> {
        let dataset = session.dataset();
        let viewport = fit_viewport(dataset.nodes(), padding)?;
        Some(Self {
            nodes: dataset.nodes(),
            edges: dataset.edges(),
            path_edges,
            active_jobs: dataset.jobs(),
            index: session.index(),
            viewport,
            tint,
        })
    }
}
