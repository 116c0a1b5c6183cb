// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire shapes for the line-delimited JSON solver protocol.
//!
//! One request object per line, one envelope per line back. Envelopes carry
//! `ok` plus either `data` or `error`; unknown fields are ignored so newer
//! solvers can attach extras without breaking older dashboards.

use serde::{Deserialize, Serialize};

use crate::model::NodeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Graph,
    Jobs,
    Topo,
    Greedy { start_node: NodeId },
    Optimal { start_node: NodeId },
    Path { from: NodeId, to: NodeId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn rejection(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            data: None,
        }
    }
}
