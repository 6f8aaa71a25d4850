// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale levels and translation bounds.
//!
//! [`ScaleBoundsPolicy`] owns the configured [`ScaleLevels`] (expressed as
//! multipliers of the fitted scale) and resolves them into absolute levels for
//! the current image and viewport. It then answers two questions:
//! - Which scale is allowed for a requested scale ([`ScaleBoundsPolicy::clamp`]).
//! - How far must a proposed display rect move to stay inside the viewport
//!   rules ([`ScaleBoundsPolicy::clamp_translation`]).

use bitflags::bitflags;
use kurbo::{Rect, Size, Vec2};

use crate::ConfigError;
use crate::fit::{Align, FitMode};

/// Minimum, medium, and maximum scale.
///
/// Always satisfies `0 < minimum <= medium <= maximum` with finite values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLevels {
    minimum: f64,
    medium: f64,
    maximum: f64,
}

impl ScaleLevels {
    /// Default configured levels, as multipliers of the fitted scale.
    pub const DEFAULT: Self = Self {
        minimum: 1.0,
        medium: 3.0,
        maximum: 5.0,
    };

    /// Validates and builds a set of levels.
    pub fn new(minimum: f64, medium: f64, maximum: f64) -> Result<Self, ConfigError> {
        for level in [minimum, medium, maximum] {
            if !level.is_finite() {
                return Err(ConfigError::NonFiniteScale(level));
            }
            if level <= 0.0 {
                return Err(ConfigError::NonPositiveScale(level));
            }
        }
        if minimum > medium || medium > maximum {
            return Err(ConfigError::UnorderedScaleLevels {
                minimum,
                medium,
                maximum,
            });
        }
        Ok(Self {
            minimum,
            medium,
            maximum,
        })
    }

    /// Lower bound; the target of a zoom‑out double tap.
    #[must_use]
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Target of a zoom‑in double tap.
    #[must_use]
    pub fn medium(&self) -> f64 {
        self.medium
    }

    /// Upper bound for pinch and programmatic scaling.
    #[must_use]
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Returns a copy with only the minimum replaced, validated.
    pub fn with_minimum(self, minimum: f64) -> Result<Self, ConfigError> {
        Self::new(minimum, self.medium, self.maximum)
    }

    /// Returns a copy with only the medium replaced, validated.
    pub fn with_medium(self, medium: f64) -> Result<Self, ConfigError> {
        Self::new(self.minimum, medium, self.maximum)
    }

    /// Returns a copy with only the maximum replaced, validated.
    pub fn with_maximum(self, maximum: f64) -> Result<Self, ConfigError> {
        Self::new(self.minimum, self.medium, maximum)
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            minimum: self.minimum * factor,
            medium: self.medium * factor,
            maximum: self.maximum * factor,
        }
    }
}

impl Default for ScaleLevels {
    fn default() -> Self {
        Self::DEFAULT
    }
}

bitflags! {
    /// Viewport edges that the displayed image currently reaches.
    ///
    /// An axis on which the image fits entirely carries both of its flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ScrollEdges: u8 {
        /// Image left edge is at (or right of) the viewport left edge.
        const LEFT = 1 << 0;
        /// Image right edge is at (or left of) the viewport right edge.
        const RIGHT = 1 << 1;
        /// Image top edge is at (or below) the viewport top edge.
        const TOP = 1 << 2;
        /// Image bottom edge is at (or above) the viewport bottom edge.
        const BOTTOM = 1 << 3;
    }
}

impl ScrollEdges {
    /// Whether a drag by `delta` pushes outward past an edge the image is pinned to.
    ///
    /// Dragging right (`dx > 0`) at the left edge reveals empty space on the
    /// left, and so on for the other edges.
    #[must_use]
    pub fn blocks(self, delta: Vec2) -> bool {
        (delta.x >= 1.0 && self.contains(Self::LEFT))
            || (delta.x <= -1.0 && self.contains(Self::RIGHT))
            || (delta.y >= 1.0 && self.contains(Self::TOP))
            || (delta.y <= -1.0 && self.contains(Self::BOTTOM))
    }
}

/// Computes scale levels and clamps scale and translation requests.
#[derive(Clone, Debug)]
pub struct ScaleBoundsPolicy {
    configured: ScaleLevels,
    resolved: ScaleLevels,
    fit_mode: FitMode,
    edge_allowance: f64,
}

impl ScaleBoundsPolicy {
    /// Creates a policy with the given configured levels and fit mode.
    ///
    /// Until [`ScaleBoundsPolicy::update`] is called, the resolved levels equal
    /// the configured ones (a fitted scale of `1.0`).
    #[must_use]
    pub fn new(configured: ScaleLevels, fit_mode: FitMode) -> Self {
        Self {
            configured,
            resolved: configured,
            fit_mode,
            edge_allowance: 0.0,
        }
    }

    /// Resolves absolute levels for an image in a viewport under `fit_mode`.
    ///
    /// The minimum is the fitted scale; medium and maximum keep their ratio to
    /// it from the configured levels.
    #[must_use]
    pub fn compute_levels(&self, viewport: Size, image: Size, fit_mode: FitMode) -> ScaleLevels {
        self.configured.scaled(fit_mode.fit_scale(viewport, image))
    }

    /// Recomputes the resolved levels for new dimensions.
    pub fn update(&mut self, viewport: Size, image: Option<Size>) {
        self.resolved = match image {
            Some(image) => self.compute_levels(viewport, image, self.fit_mode),
            None => self.configured,
        };
    }

    /// Snaps a requested absolute scale into `[minimum, maximum]`.
    #[must_use]
    pub fn clamp(&self, requested: f64) -> f64 {
        if requested.is_nan() {
            return self.resolved.minimum;
        }
        requested.clamp(self.resolved.minimum, self.resolved.maximum)
    }

    /// Correction that brings `display` back inside the viewport rules, and the
    /// edges the corrected rect reaches.
    ///
    /// Per axis: an image smaller than the viewport is aligned according to the
    /// fit mode (centered by default), discarding any drag on that axis; a larger
    /// image may move until its edge meets the viewport edge, leaving at most
    /// [`edge_allowance`](Self::edge_allowance) of empty space.
    #[must_use]
    pub fn clamp_translation(&self, display: Rect, viewport: Rect) -> (Vec2, ScrollEdges) {
        let align = self.fit_mode.align();
        let (dx, x_edges) = clamp_axis(
            display.x0,
            display.x1,
            viewport.x0,
            viewport.x1,
            align,
            self.edge_allowance,
        );
        let (dy, y_edges) = clamp_axis(
            display.y0,
            display.y1,
            viewport.y0,
            viewport.y1,
            align,
            self.edge_allowance,
        );
        let mut edges = ScrollEdges::empty();
        edges.set(ScrollEdges::LEFT, x_edges.0);
        edges.set(ScrollEdges::RIGHT, x_edges.1);
        edges.set(ScrollEdges::TOP, y_edges.0);
        edges.set(ScrollEdges::BOTTOM, y_edges.1);
        (Vec2::new(dx, dy), edges)
    }

    /// Range of translation, relative to `display`, that stays within bounds.
    ///
    /// Returns `(min, max)` offsets per axis; both are zero on an axis that
    /// cannot move.
    #[must_use]
    pub fn translation_range(&self, display: Rect, viewport: Rect) -> (Vec2, Vec2) {
        let allowance = self.edge_allowance;
        let axis = |lo: f64, hi: f64, v_lo: f64, v_hi: f64| {
            if hi - lo <= v_hi - v_lo {
                (0.0, 0.0)
            } else {
                ((v_hi - allowance - hi).min(0.0), (v_lo + allowance - lo).max(0.0))
            }
        };
        let (min_x, max_x) = axis(display.x0, display.x1, viewport.x0, viewport.x1);
        let (min_y, max_y) = axis(display.y0, display.y1, viewport.y0, viewport.y1);
        (Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Configured levels, as multipliers of the fitted scale.
    #[must_use]
    pub fn configured_levels(&self) -> ScaleLevels {
        self.configured
    }

    /// Absolute levels for the current image and viewport.
    #[must_use]
    pub fn levels(&self) -> ScaleLevels {
        self.resolved
    }

    /// Replaces the configured levels. Call [`update`](Self::update) to resolve them.
    pub fn set_configured_levels(&mut self, levels: ScaleLevels) {
        self.configured = levels;
    }

    /// Current fit mode.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Replaces the fit mode. Call [`update`](Self::update) to resolve levels.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Empty space, in viewport pixels, a larger‑than‑viewport image may reveal.
    #[must_use]
    pub fn edge_allowance(&self) -> f64 {
        self.edge_allowance
    }

    /// Sets the edge allowance; negative values are treated as zero.
    pub fn set_edge_allowance(&mut self, allowance: f64) {
        self.edge_allowance = if allowance.is_finite() {
            allowance.max(0.0)
        } else {
            0.0
        };
    }
}

impl Default for ScaleBoundsPolicy {
    fn default() -> Self {
        Self::new(ScaleLevels::DEFAULT, FitMode::default())
    }
}

/// Returns the correction along one axis and whether the start/end edges are reached.
fn clamp_axis(
    lo: f64,
    hi: f64,
    view_lo: f64,
    view_hi: f64,
    align: Align,
    allowance: f64,
) -> (f64, (bool, bool)) {
    let extent = hi - lo;
    let view_extent = view_hi - view_lo;
    if extent <= view_extent {
        let delta = match align {
            Align::Start => view_lo - lo,
            Align::Center => (view_extent - extent) / 2.0 + view_lo - lo,
            Align::End => view_hi - hi,
        };
        return (delta, (true, true));
    }
    if lo > view_lo + allowance {
        (view_lo + allowance - lo, (true, false))
    } else if hi < view_hi - allowance {
        (view_hi - allowance - hi, (false, true))
    } else {
        // Touching counts as reaching the edge.
        (0.0, (lo >= view_lo, hi <= view_hi))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size, Vec2};

    use super::{ScaleBoundsPolicy, ScaleLevels, ScrollEdges};
    use crate::{ConfigError, FitMode};

    const VIEW: Rect = Rect::new(0.0, 0.0, 1000.0, 1000.0);

    #[test]
    fn levels_reject_bad_input() {
        assert_eq!(
            ScaleLevels::new(2.0, 1.0, 3.0),
            Err(ConfigError::UnorderedScaleLevels {
                minimum: 2.0,
                medium: 1.0,
                maximum: 3.0
            })
        );
        assert_eq!(
            ScaleLevels::new(0.0, 1.0, 3.0),
            Err(ConfigError::NonPositiveScale(0.0))
        );
        assert!(matches!(
            ScaleLevels::new(1.0, f64::NAN, 3.0),
            Err(ConfigError::NonFiniteScale(_))
        ));
        assert!(ScaleLevels::new(1.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn single_level_setters_validate_against_the_others() {
        let levels = ScaleLevels::DEFAULT;
        assert!(levels.with_medium(6.0).is_err());
        assert_eq!(levels.with_maximum(8.0).unwrap().maximum(), 8.0);
        assert!(levels.with_minimum(4.0).is_err());
    }

    #[test]
    fn compute_levels_uses_fit_scale() {
        let policy = ScaleBoundsPolicy::default();
        let levels = policy.compute_levels(
            Size::new(1000.0, 1000.0),
            Size::new(2000.0, 1000.0),
            FitMode::FitCenter,
        );
        assert_eq!(levels.minimum(), 0.5);
        assert_eq!(levels.medium(), 1.5);
        assert_eq!(levels.maximum(), 2.5);
    }

    #[test]
    fn clamp_snaps_to_nearest_bound() {
        let mut policy = ScaleBoundsPolicy::default();
        policy.update(Size::new(1000.0, 1000.0), Some(Size::new(2000.0, 1000.0)));
        assert_eq!(policy.clamp(0.1), 0.5);
        assert_eq!(policy.clamp(1.0), 1.0);
        assert_eq!(policy.clamp(10.0), 2.5);
        assert_eq!(policy.clamp(f64::NAN), 0.5);
    }

    #[test]
    fn smaller_axis_is_centered_regardless_of_offset() {
        let policy = ScaleBoundsPolicy::default();
        // 1000 wide, 500 tall image dragged up and left.
        let display = Rect::new(-300.0, -100.0, 700.0, 400.0);
        let (delta, edges) = policy.clamp_translation(display, VIEW);
        assert_eq!(delta, Vec2::new(300.0, 350.0));
        assert!(edges.contains(ScrollEdges::TOP | ScrollEdges::BOTTOM));
    }

    #[test]
    fn larger_axis_stops_at_viewport_edge() {
        let policy = ScaleBoundsPolicy::default();
        // 2000 wide image dragged so its right edge sits inside the viewport.
        let display = Rect::new(-1500.0, 0.0, 500.0, 1000.0);
        let (delta, edges) = policy.clamp_translation(display, VIEW);
        assert_eq!(delta.x, 500.0);
        assert!(edges.contains(ScrollEdges::RIGHT));
        assert!(!edges.contains(ScrollEdges::LEFT));
    }

    #[test]
    fn allowance_permits_some_empty_space() {
        let mut policy = ScaleBoundsPolicy::default();
        policy.set_edge_allowance(50.0);
        let display = Rect::new(30.0, 0.0, 2030.0, 1000.0);
        let (delta, _) = policy.clamp_translation(display, VIEW);
        assert_eq!(delta.x, 0.0);
        let display = Rect::new(80.0, 0.0, 2080.0, 1000.0);
        let (delta, _) = policy.clamp_translation(display, VIEW);
        assert_eq!(delta.x, -30.0);
    }

    #[test]
    fn fit_start_aligns_small_axis_to_origin() {
        let policy = ScaleBoundsPolicy::new(ScaleLevels::DEFAULT, FitMode::FitStart);
        let display = Rect::new(0.0, 200.0, 1000.0, 700.0);
        let (delta, _) = policy.clamp_translation(display, VIEW);
        assert_eq!(delta, Vec2::new(0.0, -200.0));
    }

    #[test]
    fn edges_block_outward_drags_only() {
        let edges = ScrollEdges::LEFT;
        assert!(edges.blocks(Vec2::new(5.0, 0.0)));
        assert!(!edges.blocks(Vec2::new(-5.0, 0.0)));
        assert!(ScrollEdges::all().blocks(Vec2::new(0.0, -3.0)));
        assert!(!ScrollEdges::empty().blocks(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn translation_range_spans_overflow() {
        let policy = ScaleBoundsPolicy::default();
        let display = Rect::new(-500.0, 250.0, 1500.0, 750.0);
        let (min, max) = policy.translation_range(display, VIEW);
        assert_eq!(min, Vec2::new(-500.0, 0.0));
        assert_eq!(max, Vec2::new(500.0, 0.0));
    }
}
