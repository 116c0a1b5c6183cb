// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Hermod — terminal dashboard for a delivery-routing solver.
//!
//! The solver computes shortest paths, topology checks, and job orders;
//! hermod lays the graph out, stitches strategy results into drawable
//! routes, and renders the comparison in a terminal.

pub mod client;
pub mod compose;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod scene;
pub mod session;
pub mod tui;
