// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometric layout.
//!
//! Synthesizes node coordinates when the solver supplies none and fits
//! padded viewports around any coordinate set.

pub mod circle;
pub mod viewport;

pub use circle::{layout_circle, RING_CENTER, RING_RADIUS};
pub use viewport::{fit_viewport, Viewport};
