// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::bounds::{ScaleBoundsPolicy, ScrollEdges};

/// Whether a rotation is applied absolutely or on top of the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    /// Rotate to the given angle.
    Absolute,
    /// Rotate by the given angle relative to the current rotation.
    Relative,
}

/// A published change of the rendered matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatrixChange {
    /// The new rendered matrix.
    pub matrix: Affine,
    /// Bounding box of the transformed image, in viewport coordinates.
    pub display_rect: Option<Rect>,
}

/// Current image transform: a fit‑to‑viewport base matrix plus a user matrix.
///
/// The rendered matrix is `user * base`: image coordinates are first mapped by
/// the base matrix (derived from the [`FitMode`](crate::FitMode)), then by the
/// user matrix accumulated from gestures and programmatic calls.
///
/// Mutators return `Some(MatrixChange)` only when the rendered matrix differs
/// by value from the last one published, so callers can forward that to
/// listeners without de‑duplicating.
#[derive(Clone, Debug)]
pub struct TransformState {
    viewport: Size,
    image: Option<Size>,
    base: Affine,
    user: Affine,
    /// Rotation re‑applied on every reset, in degrees.
    base_rotation: f64,
    edges: ScrollEdges,
    published: Affine,
}

impl TransformState {
    /// Creates a state for an empty viewport with no image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Size::ZERO,
            image: None,
            base: Affine::IDENTITY,
            user: Affine::IDENTITY,
            base_rotation: 0.0,
            edges: ScrollEdges::all(),
            published: Affine::IDENTITY,
        }
    }

    /// Viewport size in device pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Native size of the displayed image, if any.
    #[must_use]
    pub fn image(&self) -> Option<Size> {
        self.image
    }

    /// Records a new viewport size. Takes effect on the next [`reset`](Self::reset).
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Records a new image size. Takes effect on the next [`reset`](Self::reset).
    pub fn set_image(&mut self, image: Option<Size>) {
        self.image = image;
    }

    /// Whether both an image and a non‑empty viewport are present.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.image.is_some() && self.viewport.width > 0.0 && self.viewport.height > 0.0
    }

    /// Rendered matrix, or the identity when there is no image.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        if self.image.is_none() {
            return Affine::IDENTITY;
        }
        self.user * self.base
    }

    /// Fit‑to‑viewport matrix.
    #[must_use]
    pub fn base_matrix(&self) -> Affine {
        self.base
    }

    /// Accumulated user matrix.
    #[must_use]
    pub fn user_matrix(&self) -> Affine {
        self.user
    }

    /// Bounding box of the transformed image in viewport coordinates.
    #[must_use]
    pub fn display_rect(&self) -> Option<Rect> {
        self.image
            .map(|image| self.matrix().transform_rect_bbox(image.to_rect()))
    }

    /// Viewport edges the image currently reaches, as of the last bounds check.
    #[must_use]
    pub fn scroll_edges(&self) -> ScrollEdges {
        self.edges
    }

    /// Uniform scale of the user matrix.
    #[must_use]
    pub fn user_scale(&self) -> f64 {
        let [a, b, ..] = self.user.as_coeffs();
        Vec2::new(a, b).hypot()
    }

    /// Current absolute scale: viewport pixels per image pixel.
    #[must_use]
    pub fn current_scale(&self, policy: &ScaleBoundsPolicy) -> f64 {
        let fit = match self.image {
            Some(image) => policy.fit_mode().fit_scale(self.viewport, image),
            None => 1.0,
        };
        fit * self.user_scale()
    }

    /// Current rotation of the user matrix, in degrees within `(-180, 180]`.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        let [a, b, ..] = self.user.as_coeffs();
        Vec2::new(a, b).atan2().to_degrees()
    }

    /// Resets the user matrix and recomputes the base matrix.
    ///
    /// The persistent rotation from [`RotationMode::Absolute`] is re‑applied.
    pub fn reset(&mut self, policy: &mut ScaleBoundsPolicy) -> Option<MatrixChange> {
        policy.update(self.viewport, self.image);
        self.base = match self.image {
            Some(image) => policy.fit_mode().base_matrix(self.viewport, image),
            None => Affine::IDENTITY,
        };
        self.user = Affine::IDENTITY;
        if self.base_rotation != 0.0 {
            self.user = self.rotation_about_center(self.base_rotation);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            viewport = ?self.viewport,
            image = ?self.image,
            minimum = policy.levels().minimum(),
            "transform reset"
        );
        self.check_bounds(policy);
        self.publish()
    }

    /// Sets an absolute scale about a focal point in viewport coordinates.
    ///
    /// The scale is clamped by `policy` first; the focal point stays fixed
    /// unless the bounds check has to move the image.
    pub fn set_scale(
        &mut self,
        scale: f64,
        focus: Point,
        policy: &ScaleBoundsPolicy,
    ) -> Option<MatrixChange> {
        if self.image.is_none() {
            return None;
        }
        let current = self.current_scale(policy);
        if current <= 0.0 {
            return None;
        }
        let target = policy.clamp(scale);
        self.user = Affine::scale_about(target / current, focus) * self.user;
        self.check_bounds(policy);
        self.publish()
    }

    /// Multiplies the current scale by `factor` about a focal point.
    pub fn scale_by(
        &mut self,
        factor: f64,
        focus: Point,
        policy: &ScaleBoundsPolicy,
    ) -> Option<MatrixChange> {
        if !(factor.is_finite() && factor > 0.0) {
            return None;
        }
        let target = self.current_scale(policy) * factor;
        self.set_scale(target, focus, policy)
    }

    /// Moves the image by `delta`, clamped to the viewport rules.
    pub fn translate(&mut self, delta: Vec2, policy: &ScaleBoundsPolicy) -> Option<MatrixChange> {
        if self.image.is_none() {
            return None;
        }
        self.user = Affine::translate(delta) * self.user;
        self.check_bounds(policy);
        self.publish()
    }

    /// Rotates about the viewport center.
    ///
    /// Absolute rotations are remembered and re‑applied after every reset.
    /// Rotation is not subject to scale clamping.
    pub fn set_rotation(
        &mut self,
        degrees: f64,
        mode: RotationMode,
        policy: &ScaleBoundsPolicy,
    ) -> Option<MatrixChange> {
        if !degrees.is_finite() {
            return None;
        }
        let by = match mode {
            RotationMode::Absolute => {
                self.base_rotation = degrees % 360.0;
                self.base_rotation - self.rotation()
            }
            RotationMode::Relative => degrees % 360.0,
        };
        if self.image.is_none() {
            return None;
        }
        self.user = self.rotation_about_center(by) * self.user;
        self.check_bounds(policy);
        self.publish()
    }

    /// Replaces the user matrix wholesale.
    ///
    /// Returns `None` when there is no image to apply it to.
    pub fn set_user_matrix(
        &mut self,
        user: Affine,
        policy: &ScaleBoundsPolicy,
    ) -> Option<MatrixChange> {
        if self.image.is_none() || !user.is_finite() || user.determinant() == 0.0 {
            return None;
        }
        self.user = user;
        self.check_bounds(policy);
        self.publish()
    }

    fn rotation_about_center(&self, degrees: f64) -> Affine {
        let center = self.viewport.to_rect().center();
        Affine::rotate_about(degrees.to_radians(), center)
    }

    fn check_bounds(&mut self, policy: &ScaleBoundsPolicy) {
        let Some(display) = self.display_rect() else {
            return;
        };
        let (delta, edges) = policy.clamp_translation(display, self.viewport.to_rect());
        self.edges = edges;
        if delta != Vec2::ZERO {
            self.user = Affine::translate(delta) * self.user;
        }
    }

    fn publish(&mut self) -> Option<MatrixChange> {
        let matrix = self.matrix();
        if matrix == self.published {
            return None;
        }
        self.published = matrix;
        Some(MatrixChange {
            matrix,
            display_rect: self.display_rect(),
        })
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{RotationMode, TransformState};
    use crate::bounds::ScaleBoundsPolicy;

    fn ready(viewport: Size, image: Size) -> (TransformState, ScaleBoundsPolicy) {
        let mut policy = ScaleBoundsPolicy::default();
        let mut state = TransformState::new();
        state.set_viewport(viewport);
        state.set_image(Some(image));
        state.reset(&mut policy);
        (state, policy)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_state_reports_identity_and_no_rect() {
        let mut state = TransformState::new();
        let policy = ScaleBoundsPolicy::default();
        assert_eq!(state.matrix(), kurbo::Affine::IDENTITY);
        assert_eq!(state.display_rect(), None);
        assert_eq!(state.translate(Vec2::new(5.0, 5.0), &policy), None);
    }

    #[test]
    fn reset_fits_wide_image() {
        let (state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(2000.0, 1000.0));
        assert!(close(state.current_scale(&policy), 0.5));
        assert_eq!(
            state.display_rect(),
            Some(Rect::new(0.0, 250.0, 1000.0, 750.0))
        );
    }

    #[test]
    fn drag_left_is_stopped_at_right_edge() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(2000.0, 1000.0));
        state.set_scale(1.0, Point::new(500.0, 500.0), &policy);
        state.translate(Vec2::new(-2000.0, 0.0), &policy);
        let rect = state.display_rect().unwrap();
        assert!(close(rect.x1, 1000.0));
        assert!(close(rect.x0, -1000.0));
    }

    #[test]
    fn drag_on_fitting_axis_is_ignored() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(2000.0, 1000.0));
        let before = state.display_rect().unwrap();
        let change = state.translate(Vec2::new(0.0, 300.0), &policy);
        assert_eq!(change, None);
        assert_eq!(state.display_rect().unwrap(), before);
    }

    #[test]
    fn set_scale_keeps_focus_fixed() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0));
        let focus = Point::new(300.0, 700.0);
        let image_pt = state.matrix().inverse() * focus;
        let change = state.set_scale(2.0, focus, &policy);
        assert!(change.is_some());
        let after = state.matrix() * image_pt;
        assert!(close(after.x, focus.x));
        assert!(close(after.y, focus.y));
        assert!(close(state.current_scale(&policy), 2.0));
    }

    #[test]
    fn set_scale_is_clamped() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(2000.0, 1000.0));
        state.set_scale(100.0, Point::new(500.0, 500.0), &policy);
        assert!(close(state.current_scale(&policy), 2.5));
        state.set_scale(0.01, Point::new(500.0, 500.0), &policy);
        assert!(close(state.current_scale(&policy), 0.5));
    }

    #[test]
    fn unchanged_matrix_is_not_republished() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0));
        assert_eq!(state.set_scale(1.0, Point::new(10.0, 10.0), &policy), None);
        assert!(state.set_scale(2.0, Point::new(10.0, 10.0), &policy).is_some());
        assert_eq!(state.set_scale(2.0, Point::new(10.0, 10.0), &policy), None);
    }

    #[test]
    fn absolute_rotation_survives_reset() {
        let (mut state, mut policy) = ready(Size::new(1000.0, 1000.0), Size::new(1000.0, 500.0));
        state.set_rotation(90.0, RotationMode::Absolute, &policy);
        assert!(close(state.rotation(), 90.0));
        state.set_rotation(30.0, RotationMode::Relative, &policy);
        assert!(close(state.rotation(), 120.0));
        state.reset(&mut policy);
        assert!(close(state.rotation(), 90.0));
        let rect = state.display_rect().unwrap();
        assert!(close(rect.width(), 500.0));
        assert!(close(rect.height(), 1000.0));
    }

    #[test]
    fn rotation_does_not_change_scale() {
        let (mut state, policy) = ready(Size::new(1000.0, 1000.0), Size::new(1000.0, 1000.0));
        state.set_rotation(45.0, RotationMode::Relative, &policy);
        assert!(close(state.current_scale(&policy), 1.0));
    }

    #[test]
    fn user_matrix_requires_an_image() {
        let mut state = TransformState::new();
        let policy = ScaleBoundsPolicy::default();
        assert_eq!(
            state.set_user_matrix(kurbo::Affine::scale(2.0), &policy),
            None
        );
    }
}
