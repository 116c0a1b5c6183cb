// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::TAU;

use crate::model::{Node, NodeId};

/// World-space ring every coordinate-less snapshot is placed on.
pub const RING_RADIUS: f64 = 250.0;
pub const RING_CENTER: (f64, f64) = (300.0, 300.0);

/// Places nodes evenly on the ring, in input order, starting at angle zero.
///
/// Deterministic for a given input order: index `i` of `n` gets angle
/// `2π·i/n`. Zero ids produce an empty layout; a single id lands at
/// `(center.x + radius, center.y)`.
pub fn layout_circle(node_ids: &[NodeId]) -> Vec<Node> {
    let count = node_ids.len();
    node_ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let angle = TAU * index as f64 / count as f64;
            Node::new(
                *id,
                format!("Node {id}"),
                RING_CENTER.0 + RING_RADIUS * angle.cos(),
                RING_CENTER.1 + RING_RADIUS * angle.sin(),
            )
        })
        .collect()
}
