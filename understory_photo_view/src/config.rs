// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::animation::{DEFAULT_FLING_DECELERATION, DEFAULT_ZOOM_DURATION_MS};
use crate::bounds::ScaleLevels;
use crate::fit::FitMode;
use crate::gesture::GestureConfig;

/// Complete configuration of a [`PhotoView`](crate::PhotoView).
///
/// Every field can also be changed later through the corresponding
/// `PhotoView` setter; this struct exists so embedders can build a view in one
/// step and snapshot its settings with [`PhotoView::config`](crate::PhotoView::config).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoViewConfig {
    /// Scale levels as multipliers of the fitted scale.
    pub scale_multipliers: ScaleLevels,
    /// How the image is fitted into the viewport at minimum scale.
    pub fit_mode: FitMode,
    /// When `false`, drag, pinch, and fling are ignored; taps still pass through.
    pub zoomable: bool,
    /// Yield drags to a parent scroll container at the image edge.
    pub allow_parent_intercept_on_edge: bool,
    /// Duration of programmatic and double‑tap zoom transitions.
    pub zoom_transition_duration_ms: u64,
    /// Fling deceleration in pixels per second squared.
    pub fling_deceleration: f64,
    /// Empty space, in viewport pixels, a larger‑than‑viewport image may reveal.
    pub edge_allowance: f64,
    /// Gesture classification thresholds.
    pub gesture: GestureConfig,
}

impl Default for PhotoViewConfig {
    fn default() -> Self {
        Self {
            scale_multipliers: ScaleLevels::DEFAULT,
            fit_mode: FitMode::default(),
            zoomable: true,
            allow_parent_intercept_on_edge: true,
            zoom_transition_duration_ms: DEFAULT_ZOOM_DURATION_MS,
            fling_deceleration: DEFAULT_FLING_DECELERATION,
            edge_allowance: 0.0,
            gesture: GestureConfig::default(),
        }
    }
}
