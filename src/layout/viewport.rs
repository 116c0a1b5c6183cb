// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Node;

/// A padded bounding rectangle framing a node coordinate set. Computed on
/// demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Fits a viewport around the nodes with a uniform margin.
///
/// `padding` is caller-supplied and must be non-negative. Empty input has
/// no bounds and yields `None`; callers substitute a placeholder view. A
/// single point (or all-equal coordinates) degenerates to a `2·padding`
/// square around it.
pub fn fit_viewport(nodes: &[Node], padding: f64) -> Option<Viewport> {
    let first = nodes.first()?;
    let (mut min_x, mut max_x) = (first.x(), first.x());
    let (mut min_y, mut max_y) = (first.y(), first.y());
    for node in &nodes[1..] {
        min_x = min_x.min(node.x());
        max_x = max_x.max(node.x());
        min_y = min_y.min(node.y());
        max_y = max_y.max(node.y());
    }
    Some(Viewport::new(
        min_x - padding,
        min_y - padding,
        max_x - min_x + 2.0 * padding,
        max_y - min_y + 2.0 * padding,
    ))
}
