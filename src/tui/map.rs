// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Depot map rendering on a braille canvas.
//!
//! Layer order is fixed: base edges first, then the highlighted route, then
//! depot dots and labels, so the route never hides a depot.

use std::collections::BTreeMap;

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph, Wrap,
    },
};

use super::theme::TuiTheme;
use crate::model::{Job, JobKind, NodeId};
use crate::scene::Scene;

const START_RING_RADIUS: f64 = 14.0;
const LABEL_RISE: f64 = 16.0;
const DIRECTION_TICK_AT: f64 = 0.72;
const PARALLEL_LABEL_RISE: f64 = 14.0;

pub(crate) struct MapParams<'a> {
    pub(crate) scene: Option<Scene<'a>>,
    pub(crate) theme: &'a TuiTheme,
    pub(crate) start: Option<NodeId>,
    pub(crate) show_weights: bool,
    pub(crate) title: String,
    pub(crate) focused: bool,
}

pub(crate) fn draw_map(frame: &mut Frame<'_>, area: Rect, params: MapParams<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(params.title)
        .border_style(params.theme.panel_border_style(params.focused));

    let Some(scene) = params.scene else {
        let placeholder = Paragraph::new("No depots loaded. Press r to fetch the dataset.")
            .style(params.theme.base_style())
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let viewport = scene.viewport;
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([viewport.x(), viewport.x() + viewport.width()])
        .y_bounds([viewport.y(), viewport.y() + viewport.height()])
        .paint(move |ctx| {
            paint_scene(
                ctx,
                &scene,
                params.theme,
                params.start,
                params.show_weights,
            )
        });
    frame.render_widget(canvas, area);
}

fn paint_scene(
    ctx: &mut Context<'_>,
    scene: &Scene<'_>,
    theme: &TuiTheme,
    start: Option<NodeId>,
    show_weights: bool,
) {
    let positions: BTreeMap<NodeId, (f64, f64)> = scene
        .nodes
        .iter()
        .map(|node| (node.id(), node.position()))
        .collect();

    let edge_color = theme.edge_color();
    // Parallel edges overlap on the canvas; stack their weight labels.
    let mut seen_pairs: BTreeMap<(NodeId, NodeId), usize> = BTreeMap::new();
    for edge in scene.edges {
        let (Some(from), Some(to)) = (
            positions.get(&edge.from_node()),
            positions.get(&edge.to_node()),
        ) else {
            continue;
        };
        ctx.draw(&CanvasLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color: edge_color,
        });
        let tick = point_along(*from, *to, DIRECTION_TICK_AT);
        ctx.draw(&Points {
            coords: &[tick],
            color: edge_color,
        });

        if show_weights {
            let rank = seen_pairs
                .entry((edge.from_node(), edge.to_node()))
                .and_modify(|rank| *rank += 1)
                .or_insert(0);
            let (mid_x, mid_y) = point_along(*from, *to, 0.5);
            ctx.print(
                mid_x,
                mid_y + *rank as f64 * PARALLEL_LABEL_RISE,
                Line::styled(
                    weight_label(edge.weight()),
                    Style::default().fg(edge_color),
                ),
            );
        }
    }

    ctx.layer();
    let tint = theme.tint_color(scene.tint);
    for (from, to) in scene.path_edges {
        let (Some(from), Some(to)) = (positions.get(from), positions.get(to)) else {
            continue;
        };
        ctx.draw(&CanvasLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color: tint,
        });
    }

    ctx.layer();
    for node in scene.nodes {
        let is_start = start == Some(node.id());
        let color = if is_start {
            theme.start_color()
        } else {
            theme.node_color()
        };
        if is_start {
            ctx.draw(&Circle {
                x: node.x(),
                y: node.y(),
                radius: START_RING_RADIUS,
                color,
            });
        }
        ctx.draw(&Points {
            coords: &[(node.x(), node.y())],
            color,
        });
        ctx.print(
            node.x(),
            node.y() + LABEL_RISE,
            Line::styled(node.name().to_owned(), Style::default().fg(color)),
        );

        let jobs = scene.index.jobs_at(node.id());
        if !jobs.is_empty() {
            ctx.print(
                node.x(),
                node.y() - LABEL_RISE,
                Line::styled(
                    job_marker(jobs),
                    Style::default().fg(theme.marker_color()),
                ),
            );
        }
    }
}

fn point_along(from: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

fn weight_label(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{weight:.0}")
    } else {
        format!("{weight}")
    }
}

/// Marker text under a depot: kind glyph plus job id, or a plain count when
/// several jobs share the depot.
fn job_marker(jobs: &[Job]) -> String {
    match jobs {
        [job] => format!("{}{}", kind_glyph(job.kind()), job.id()),
        many => format!("{} jobs", many.len()),
    }
}

fn kind_glyph(kind: JobKind) -> char {
    match kind {
        JobKind::Pickup => 'P',
        JobKind::Dropoff => 'D',
    }
}
